//! Text reports for `/analisis` and `/prediksi`.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use rand::Rng;
use thiserror::Error;

use super::{
    CrossPattern, DigitFrequency, Draw, cold_digits, cross_pattern, date_digits, hot_digits,
    recommendations, weighted_sample,
};
use crate::record::DATE_FORMAT;

/// Draws considered by `/analisis`.
pub const ANALYSIS_WINDOW: usize = 30;

/// Draws considered by `/prediksi`.
pub const PREDICTION_WINDOW: usize = 50;

const HOT_WINDOW: usize = 5;
const COLD_WINDOW: usize = 10;

/// Why no report could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no records")]
    NoData,
    #[error("no digits in any result")]
    NoDigits,
}

/// Frequency, hot and cold digits over the most recent draws.
pub fn analysis_report(draws: &[Draw]) -> Result<String, ReportError> {
    let recent = &draws[..draws.len().min(ANALYSIS_WINDOW)];
    let Some(latest) = recent.first() else {
        return Err(ReportError::NoData);
    };

    let freq = DigitFrequency::from_draws(recent);
    if freq.is_empty() {
        return Err(ReportError::NoDigits);
    }

    let hot = hot_digits(recent, HOT_WINDOW);
    let cold = cold_digits(recent, COLD_WINDOW);

    let mut text = format!("📊 <b>Analisis Data Terbaru</b> ({ANALYSIS_WINDOW} periode terakhir)\n\n");
    text.push_str("🔢 <b>Frekuensi Angka:</b>\n");
    let _ = writeln!(
        text,
        "- Angka paling sering muncul: {}",
        format_counts(&freq.most_common(5))
    );
    let _ = writeln!(
        text,
        "- Angka paling jarang muncul: {}\n",
        format_counts(&freq.least_common(5))
    );
    let _ = writeln!(
        text,
        "🔥 <b>Angka Panas</b> (muncul dalam {HOT_WINDOW} periode terakhir):\n{}\n",
        join_or(&hot, "Tidak ada data")
    );
    let _ = writeln!(
        text,
        "❄️ <b>Angka Dingin</b> (tidak muncul dalam {COLD_WINDOW} periode terakhir):\n{}\n",
        join_or(&cold, "Tidak ada")
    );
    let _ = write!(
        text,
        "📅 <b>Update terakhir:</b> {}",
        latest.date.format(DATE_FORMAT)
    );

    Ok(text)
}

/// The six prediction heuristics over the most recent draws.
pub fn prediction_report<R: Rng + ?Sized>(
    draws: &[Draw],
    rng: &mut R,
) -> Result<String, ReportError> {
    let recent = &draws[..draws.len().min(PREDICTION_WINDOW)];
    let Some(latest) = recent.first() else {
        return Err(ReportError::NoData);
    };

    let freq = DigitFrequency::from_draws(recent);
    if freq.is_empty() {
        return Err(ReportError::NoDigits);
    }

    let top: Vec<char> = freq.most_common(10).into_iter().map(|(d, _)| d).collect();
    let top5 = &top[..top.len().min(5)];
    let hot = hot_digits(recent, HOT_WINDOW);
    let date_based = date_digits(latest.date);

    let weighted = weighted_sample(&freq, 3, rng);
    let weighted = if weighted.is_empty() {
        "Tidak cukup data".to_owned()
    } else {
        join(weighted.iter())
    };

    let cross = match cross_pattern(recent) {
        CrossPattern::NotEnoughData => "Tidak cukup data".to_owned(),
        CrossPattern::Unavailable => "Tidak bisa dihitung".to_owned(),
        CrossPattern::Digits(digits) => join(digits.iter()),
    };

    let recs = recommendations(top5, &hot, &date_based, 3, rng);
    let recs = if recs.is_empty() {
        "Tidak bisa membuat rekomendasi".to_owned()
    } else {
        recs.iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut text = "🎯 <b>Prediksi Angka untuk Periode Berikutnya</b>\n\n".to_owned();
    let _ = writeln!(text, "📊 Berdasarkan analisis {} data terakhir:\n", recent.len());
    let _ = writeln!(text, "1. <b>Frekuensi Tinggi</b>: {}", join(top5.iter()));
    let _ = writeln!(text, "2. <b>Angka Panas</b>: {}", join_or(&hot, "Tidak ada data"));
    let _ = writeln!(text, "3. <b>Berdasarkan Tanggal</b>: {}", join(date_based.iter()));
    let _ = writeln!(text, "4. <b>Angka Acak Terbobot</b>: {weighted}");
    let _ = writeln!(text, "5. <b>Pola Silang</b>: {cross}\n");
    let _ = writeln!(text, "💡 <b>Rekomendasi Kombinasi</b>:\n{recs}\n");
    text.push_str(
        "⚠️ <b>Catatan</b>: Prediksi ini berdasarkan analisis statistik dan tidak menjamin kemenangan.",
    );

    Ok(text)
}

fn format_counts(counts: &[(char, usize)]) -> String {
    counts
        .iter()
        .map(|(digit, count)| format!("{digit} ({count}x)"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join<'a>(digits: impl Iterator<Item = &'a char>) -> String {
    digits.map(char::to_string).collect::<Vec<_>>().join(", ")
}

fn join_or(digits: &BTreeSet<char>, empty: &str) -> String {
    if digits.is_empty() {
        empty.to_owned()
    } else {
        join(digits.iter())
    }
}
