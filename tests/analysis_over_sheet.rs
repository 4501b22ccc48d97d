//! Records written by the input bot are read back by the analysis bot.

use std::sync::Arc;

use togel_bots::analysis::AnalysisEngine;
use togel_bots::commands::analysis as replies;
use togel_bots::conversation::{ConversationEngine, SessionKey};
use togel_bots::record::UserIdentity;
use togel_bots::sheets::{MemorySheet, ensure_header};

fn budi() -> UserIdentity {
    UserIdentity {
        id: 10,
        username: Some("budi".to_owned()),
        first_name: "Budi".to_owned(),
        last_name: None,
    }
}

async fn seeded(lines: &[&str]) -> Arc<MemorySheet> {
    let sheet = Arc::new(MemorySheet::new());
    ensure_header(sheet.as_ref()).await.unwrap();
    let input = ConversationEngine::new(sheet.clone());
    let key = SessionKey::new(1, 10);
    for line in lines {
        assert!(input.handle_text(key, &budi(), line).await.is_some());
    }
    sheet
}

#[tokio::test]
async fn test_analysis_sees_input_bot_records() {
    let sheet = seeded(&[
        "01/12/2025, 1111, 1123",
        "03/12/2025, 3333, 7789",
        "02/12/2025, 2222, 4456",
    ])
    .await;
    let engine = AnalysisEngine::new(sheet);

    let report = engine.analyze().await;
    assert!(report.contains("1 (2x), 4 (2x), 7 (2x)"));
    assert!(report.contains("Update terakhir:</b> 03/12/2025"));
}

#[tokio::test]
async fn test_prediction_uses_latest_draw_date() {
    let sheet = seeded(&[
        "10/11/2025, 1111, 1234",
        "28/11/2025, 2222, 5678",
        "05/11/2025, 3333, 9012",
        "01/11/2025, 4444, 3456",
        "03/11/2025, 5555, 7890",
    ])
    .await;
    let engine = AnalysisEngine::new(sheet);

    let report = engine.predict().await;
    // Latest draw 28/11: day 8, month 1
    assert!(report.contains("Berdasarkan Tanggal</b>: 1, 8"));
    assert!(report.contains("Berdasarkan analisis 5 data terakhir"));
}

#[tokio::test]
async fn test_analysis_of_empty_sheet() {
    let sheet = seeded(&[]).await;
    let engine = AnalysisEngine::new(sheet);
    assert_eq!(engine.analyze().await, replies::NO_DATA);
    assert_eq!(engine.predict().await, replies::NO_DATA);
}
