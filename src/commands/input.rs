//! Commands and replies of the data-input bot.

use teloxide::utils::command::BotCommands;
use teloxide::utils::html;

use crate::record::Record;

/// Commands understood by the data-input bot.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Perintah yang tersedia:")]
pub enum InputCommand {
    #[command(description = "Memulai bot")]
    Start,
    #[command(description = "Menampilkan bantuan")]
    Help,
    #[command(description = "Memulai input data baru")]
    Input,
    #[command(description = "Membatalkan proses input data")]
    Cancel,
    #[command(description = "Menampilkan data yang sudah diinput")]
    Showdata,
}

pub const HELP: &str = "📋 <b>Perintah yang tersedia:</b>

/start - Memulai bot
/input - Memulai input data baru
/showdata - Menampilkan semua data yang sudah diinput
/cancel - Membatalkan proses input data
/help - Menampilkan bantuan ini

📝 <b>Format Input Data:</b>
1. Tanggal (format: DD/MM/YYYY)
2. Periode (contoh: 1111)
3. Result (contoh: 1234)

<b>Cara Input:</b>
- Bertahap: ketik /input lalu ikuti petunjuk
- Langsung: kirim \"01/12/2025, 1111, 1234\"";

pub const DATE_PROMPT: &str = "📋 <b>Memulai Input Data Baru</b>

Silakan masukkan <b>tanggal</b> (format: DD/MM/YYYY)
Contoh: 01/12/2025

Ketik /cancel untuk membatalkan.";

pub const INVALID_DATE: &str = "❌ Format tanggal tidak valid!
Silakan masukkan tanggal dengan format DD/MM/YYYY
Contoh: 01/12/2025";

pub const INVALID_PERIOD: &str = "❌ Periode harus berupa 4 digit angka!
Contoh: 1111";

pub const INVALID_RESULT: &str = "❌ Result harus berupa 4 digit angka!
Contoh: 1234";

pub const DIRECT_INVALID_DATE: &str = "❌ Format tanggal salah. Gunakan DD/MM/YYYY
Contoh: 01/12/2025, 1111, 1234";

pub const DIRECT_INVALID_DIGITS: &str = "❌ Periode dan Result harus 4 digit angka
Contoh: 01/12/2025, 1111, 1234";

pub const SAVE_FAILED: &str = "❌ Terjadi kesalahan saat menyimpan data!
Silakan coba lagi nanti atau hubungi administrator.";

pub const CANCELLED: &str = "❌ Proses input data dibatalkan.
Gunakan /input untuk memulai lagi.";

pub const NO_DATA: &str = "📭 Tidak ada data yang tersimpan.";

pub const NO_USER_DATA: &str = "📭 Anda belum menginput data apapun.";

pub const LOAD_FAILED: &str = "❌ Terjadi kesalahan saat mengambil data.
Silakan coba lagi nanti atau hubungi administrator.";

/// Greeting for `/start`.
#[must_use]
pub fn welcome(first_name: &str) -> String {
    format!(
        "Halo {}! 👋\n\n\
         Selamat datang di Bot Input Data Telegram!\n\
         Bot ini akan membantu Anda menginput data ke spreadsheet.\n\n\
         Gunakan /input untuk mulai input data baru.\n\
         Gunakan /showdata untuk melihat data yang sudah diinput.\n\
         Gunakan /help untuk melihat perintah yang tersedia.",
        html::escape(first_name)
    )
}

/// Asks for the period after a date was accepted.
#[must_use]
pub fn period_prompt(date: &str) -> String {
    format!(
        "✅ Tanggal: {}\n\nSekarang masukkan <b>periode</b>.\nContoh: 1111",
        html::escape(date)
    )
}

/// Asks for the result after a period was accepted.
#[must_use]
pub fn result_prompt(period: &str) -> String {
    format!(
        "✅ Periode: {}\n\nSekarang masukkan <b>result</b>.\nContoh: 1234",
        html::escape(period)
    )
}

/// Confirmation sent after a record was appended.
#[must_use]
pub fn saved(record: &Record) -> String {
    format!(
        "✅ <b>Data berhasil disimpan!</b>\n\n\
         📅 <b>Tanggal:</b> {}\n\
         🔢 <b>Periode:</b> {}\n\
         📊 <b>Result:</b> {}\n\
         👤 <b>User:</b> {}\n\
         ⏱ <b>Timestamp:</b> {}\n\n\
         Gunakan /input untuk menambah data baru.",
        html::escape(&record.date),
        html::escape(&record.period),
        html::escape(&record.result),
        html::escape(&record.submitter),
        html::escape(&record.timestamp),
    )
}
