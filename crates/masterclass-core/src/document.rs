//! The content document: every piece of text and configuration the landing
//! page shows, stored as one JSON record.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of talking points the landing page lists.
pub const POINT_COUNT: usize = 3;

/// Countdown length used when nothing better is known.
pub const DEFAULT_COUNTDOWN_MINUTES: u32 = 2;

/// All landing-page content.
///
/// Serialized with camelCase field names; this is the wire format of the
/// content API and the format stored under the content key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub time: String,
    pub description: String,
    /// Exactly three talking points, in display order.
    #[serde(deserialize_with = "deserialize_points")]
    pub points: [String; POINT_COUNT],
    pub button_text: String,
    /// External messaging channel the main button opens.
    pub telegram_link: String,
    pub gift_title: String,
    pub gift_description: String,
    pub countdown_minutes: u32,
}

impl ContentDocument {
    /// Countdown length in seconds.
    #[must_use]
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_minutes.saturating_mul(60)
    }
}

impl Default for ContentDocument {
    /// The built-in announcement, shown whenever no document has been saved
    /// or the content API cannot be reached. Never persisted by a read.
    fn default() -> Self {
        Self {
            title: "BEPUL ONLINE MASTERCLASS".to_owned(),
            subtitle: "«SO'ROVNOMA TUZISH VA NATIJALARNI TAHLIL QILISH»".to_owned(),
            date: "12-noyabr".to_owned(),
            time: "19:00".to_owned(),
            description: "Ozbekistonda birinchi marta marketing va biznes sohasi bo'yicha \
                          marketing hamjamiyati tomonidan tashkil etilayotgan bepul online \
                          masterclass!"
                .to_owned(),
            points: [
                "So'rovnoma turlari va ularning afzalliklari hamda kamchiliklari haqida bilib olasiz"
                    .to_owned(),
                "So'rovnomani qanday tuzish va qayerda e'lon qilish haqida ma'lumot olasiz"
                    .to_owned(),
                "So'rovnoma natijalarini tahlil qilish va ulardan qanday foydalanish haqida bilib olasiz"
                    .to_owned(),
            ],
            button_text: "BEPUL QATNASHISH".to_owned(),
            telegram_link: "https://t.me/".to_owned(),
            gift_title: "ISHTIROKCHILARIMIZGA SOVG'A".to_owned(),
            gift_description: "Masterklassda qatnashgan barcha ishtirokchilar uchun qo'shimcha \
                               bonuslar va materiallar taqdim etiladi!"
                .to_owned(),
            countdown_minutes: DEFAULT_COUNTDOWN_MINUTES,
        }
    }
}

/// Accept any list of strings for `points`: short lists are padded with
/// empty strings, extra entries are dropped.
fn deserialize_points<'de, D>(deserializer: D) -> Result<[String; POINT_COUNT], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut points: [String; POINT_COUNT] = Default::default();
    for (slot, point) in points.iter_mut().zip(raw) {
        *slot = point;
    }
    Ok(points)
}
