//! Commands and fixed replies of the analysis bot.

use teloxide::utils::command::BotCommands;
use teloxide::utils::html;

/// Commands understood by the analysis bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Perintah yang tersedia:")]
pub enum AnalysisCommand {
    #[command(description = "Memulai bot")]
    Start,
    #[command(description = "Menampilkan bantuan")]
    Help,
    #[command(description = "Analisis data terbaru dari spreadsheet")]
    Analisis,
    #[command(description = "Menampilkan prediksi angka untuk periode berikutnya")]
    Prediksi,
    #[command(description = "Menjelaskan metode analisis yang digunakan")]
    Metode,
}

pub const HELP: &str = "🔍 <b>BOT ANALISIS TOGEL</b> 🔍

📊 <b>Perintah yang tersedia:</b>
/start - Memulai bot
/help - Menampilkan bantuan ini
/analisis - Analisis data terbaru dari spreadsheet
/prediksi - Menampilkan prediksi angka untuk periode berikutnya
/metode - Menjelaskan metode analisis yang digunakan

📈 <b>Metode Analisis:</b>
1. Analisis Frekuensi Angka
2. Pola Angka Panas/Dingin
3. Prediksi Berdasarkan Tanggal
4. Pola Silang Antar Periode
5. Angka Acak Terbobot
6. Rekomendasi Kombinasi";

pub const METHODS: &str = "📚 <b>Metode Analisis Togel yang Digunakan:</b>

1. <b>Analisis Frekuensi Angka</b>:
   - Mencari angka yang paling sering muncul
   - Mencari angka yang paling jarang muncul

2. <b>Pola Angka Panas/Dingin</b>:
   - Angka panas: angka yang muncul dalam 5 periode terakhir
   - Angka dingin: angka yang tidak muncul dalam 10 periode terakhir

3. <b>Prediksi Berdasarkan Tanggal</b>:
   - Digit terakhir dari hari dan bulan undian terbaru

4. <b>Pola Silang</b>:
   - Digit pertama dari 3 result terakhir dan digit terakhir dari 2 result sebelumnya

5. <b>Angka Acak Terbobot</b>:
   - Angka acak dengan bobot berdasarkan frekuensi kemunculan

6. <b>Rekomendasi Kombinasi</b>:
   - Kombinasi acak dari angka frekuensi tinggi, angka panas, dan angka tanggal";

pub const NO_DATA: &str = "❌ Tidak ada data yang ditemukan di spreadsheet.";

pub const NO_DIGITS_ANALYSIS: &str = "❌ Tidak ada data angka yang valid untuk dianalisis.";

pub const NO_DIGITS_PREDICTION: &str = "❌ Tidak ada data angka yang valid untuk diprediksi.";

pub const ANALYSIS_FAILED: &str = "❌ Terjadi kesalahan saat menganalisis data.";

pub const PREDICTION_FAILED: &str = "❌ Terjadi kesalahan saat membuat prediksi.";

/// Greeting for `/start`.
#[must_use]
pub fn welcome(first_name: &str) -> String {
    format!(
        "Halo {}! 👋\n\n\
         Selamat datang di <b>Bot Analisis Togel</b>\n\n\
         📊 Saya akan menganalisis data dari spreadsheet untuk membantu memprediksi angka togel.\n\n\
         🔍 <b>Perintah yang tersedia:</b>\n\
         /start - Memulai bot\n\
         /help - Menampilkan bantuan\n\
         /analisis - Melakukan analisis data terbaru\n\
         /prediksi - Menampilkan prediksi angka\n\
         /metode - Menjelaskan metode analisis yang digunakan",
        html::escape(first_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            AnalysisCommand::parse("/analisis", "bot").unwrap(),
            AnalysisCommand::Analisis
        );
        assert_eq!(
            AnalysisCommand::parse("/prediksi", "bot").unwrap(),
            AnalysisCommand::Prediksi
        );
        assert_eq!(AnalysisCommand::parse("/metode", "bot").unwrap(), AnalysisCommand::Metode);
    }

    #[test]
    fn test_input_commands_are_not_analysis_commands() {
        assert!(AnalysisCommand::parse("/input", "bot").is_err());
    }
}
