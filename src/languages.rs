// Fixed language tables for the questionnaire: questions, UI labels and the
// canned default prompt, one pack per supported language.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of languages a session can run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Arabic,
    Russian,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Arabic,
        Language::Russian,
        Language::German,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
            Language::Russian => "Russian",
            Language::German => "German",
        }
    }

    /// Flag shown next to the language on the pick screen.
    pub fn flag(&self) -> &'static str {
        match self {
            Language::English => "\u{1F1FA}\u{1F1F8}",
            Language::Arabic => "\u{1F1EA}\u{1F1EC}",
            Language::Russian => "\u{1F1F7}\u{1F1FA}",
            Language::German => "\u{1F1E9}\u{1F1EA}",
        }
    }

    pub fn from_name(name: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|l| l.name() == name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Button and status strings shown while a session runs in one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub next_question: &'static str,
    pub generate_itinerary: &'static str,
    pub escape_generate: &'static str,
    pub generating: &'static str,
    pub suggested_itinerary: &'static str,
}

/// Everything the UI and the prompt builder need for one language.
#[derive(Debug, Clone, Copy)]
pub struct LanguagePack {
    pub questions: &'static [&'static str],
    pub labels: Labels,
    pub default_prompt: &'static str,
}

const ENGLISH_QUESTIONS: &[&str] = &[
    "What place do you want to visit in Egypt?",
    "Do you prefer to visit historical/archaeological sites or natural/marine sites?",
    "How many hours or days do you have available for the tour?",
    "Do you travel alone or with family/friends?",
    "Do you like to shop and buy souvenirs, or do you focus on visiting and taking pictures?",
    "What is your budget for the tour? Do you prefer something economical or luxury?",
];

const ARABIC_QUESTIONS: &[&str] = &[
    "ما المكان الذي ترغب بزيارته في مصر؟",
    "هل تفضل زيارة المواقع التاريخية/الأثرية أم المواقع الطبيعية/البحرية؟",
    "كم عدد الساعات أو الأيام المتاحة لديك للجولة؟",
    "هل تسافر وحدك أم مع العائلة/الأصدقاء؟",
    "هل تحب التسوق وشراء الهدايا التذكارية أم تركز على الزيارة والتقاط الصور؟",
    "ما هي ميزانيتك للجولة؟ هل تفضل شيئًا اقتصاديًا أم فاخرًا؟",
];

const RUSSIAN_QUESTIONS: &[&str] = &[
    "Какое место вы хотите посетить в Египте?",
    "Вы предпочитаете посещать исторические/археологические места или природные/морские места?",
    "Сколько часов или дней у вас есть на тур?",
    "Вы путешествуете в одиночку или с семьей/друзьями?",
    "Вы любите делать покупки и покупать сувениры, или вы сосредотачиваетесь на посещении и фотографировании?",
    "Каков ваш бюджет на тур? Вы предпочитаете что-то экономичное или роскошное?",
];

const GERMAN_QUESTIONS: &[&str] = &[
    "Welchen Ort möchten Sie in Ägypten besuchen?",
    "Bevorzugen Sie historische/archäologische Stätten oder Natur-/Meeresschutzgebiete?",
    "Wie viele Stunden oder Tage stehen Ihnen für die Tour zur Verfügung?",
    "Reisen Sie alleine oder mit Familie/Freunden?",
    "Kaufen Sie gerne ein und kaufen Sie Souvenirs, oder konzentrieren Sie sich auf Besichtigungen und Fotografieren?",
    "Wie hoch ist Ihr Budget für die Tour? Bevorzugen Sie etwas Preisgünstiges oder Luxuriöses?",
];

lazy_static::lazy_static! {
    static ref PACKS: HashMap<Language, LanguagePack> = {
        let mut packs = HashMap::new();
        packs.insert(Language::English, LanguagePack {
            questions: ENGLISH_QUESTIONS,
            labels: Labels {
                next_question: "Next Question",
                generate_itinerary: "Generate Itinerary",
                escape_generate: "Escape and Generate Itinerary",
                generating: "Thank you for answering the questions. Generating your personalized itinerary...",
                suggested_itinerary: "Your Suggested Itinerary:",
            },
            default_prompt: "Generate a general 3-day itinerary for visiting the highlights of Cairo, Egypt, including historical and cultural sites.",
        });
        packs.insert(Language::Arabic, LanguagePack {
            questions: ARABIC_QUESTIONS,
            labels: Labels {
                next_question: "السؤال التالي",
                generate_itinerary: "إنشاء خط سير الرحلة",
                escape_generate: "تجاوز وإنشاء خط سير الرحلة",
                generating: "شكراً لإجابتك على الأسئلة. جاري إنشاء خط سير رحلتك المخصص...",
                suggested_itinerary: "خط سير الرحلة المقترح لك:",
            },
            default_prompt: "قم بإنشاء خط سير رحلة عام لمدة 3 أيام لزيارة أبرز معالم القاهرة، مصر، بما في ذلك المواقع التاريخية والثقافية.",
        });
        packs.insert(Language::Russian, LanguagePack {
            questions: RUSSIAN_QUESTIONS,
            labels: Labels {
                next_question: "Следующий вопрос",
                generate_itinerary: "Сформировать маршрут",
                escape_generate: "Пропустить и сформировать маршрут",
                generating: "Спасибо за ответы на вопросы. Формируем ваш персональный маршрут...",
                suggested_itinerary: "Ваш предложенный маршрут:",
            },
            default_prompt: "Создайте общий 3-дневный маршрут для посещения основных достопримечательностей Каира, Египет, включая исторические и культурные объекты.",
        });
        packs.insert(Language::German, LanguagePack {
            questions: GERMAN_QUESTIONS,
            labels: Labels {
                next_question: "Nächste Frage",
                generate_itinerary: "Reiseroute generieren",
                escape_generate: "Überspringen und Reiseroute generieren",
                generating: "Vielen Dank für die Beantwortung der Fragen. Ihre personalisierte Reiseroute wird generiert...",
                suggested_itinerary: "Ihre vorgeschlagene Reiseroute:",
            },
            default_prompt: "Erstellen Sie eine allgemeine 3-Tages-Reiseroute für den Besuch der Highlights von Kairo, Ägypten, einschließlich historischer und kultureller Stätten.",
        });
        packs
    };
}

/// Look up the pack for a language. The enum is closed, so every variant has
/// an entry; fall back to English rather than panic if the set ever grows
/// faster than the tables.
pub fn pack(language: Language) -> &'static LanguagePack {
    PACKS
        .get(&language)
        .unwrap_or_else(|| &PACKS[&Language::English])
}

/// The canned prompt used when no usable answers survive filtering.
/// Falls back to the English prompt for a language with no canned entry.
pub fn default_prompt(language: Language) -> &'static str {
    PACKS
        .get(&language)
        .map(|p| p.default_prompt)
        .unwrap_or_else(|| PACKS[&Language::English].default_prompt)
}

/// Startup validation: every language must carry the same, non-zero number
/// of questions, since the state machine walks them by shared index.
pub fn validate_packs() -> Result<()> {
    let expected = pack(Language::English).questions.len();
    if expected == 0 {
        bail!("English question table is empty");
    }
    for language in Language::ALL {
        let count = pack(language).questions.len();
        if count != expected {
            bail!(
                "question table for {} has {} entries, expected {}",
                language,
                count,
                expected
            );
        }
    }
    Ok(())
}
