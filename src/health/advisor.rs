//! Symptom checker and wellness tips.
//!
//! The rule-based analyzer is a fixed keyword table. It gives general
//! guidance only and makes no diagnostic claims.

use rand::seq::SliceRandom;

use crate::error::Result;

use super::health_models::{HealthAdvice, Severity};
use super::openai::OpenAiAdvisor;

pub const HEALTH_TIPS: &[&str] = &[
    "Take breaks every hour when working at a desk to reduce eye strain and improve circulation.",
    "Practice deep breathing exercises to reduce stress and improve focus.",
    "Maintain good posture throughout the day to prevent back pain.",
    "Stay hydrated! Aim to drink water before you feel thirsty.",
    "Get at least 7-8 hours of sleep each night for optimal health.",
    "Take a short walk after meals to aid digestion and maintain blood sugar levels.",
    "Practice mindfulness or meditation to improve mental well-being.",
    "Eat a variety of colorful fruits and vegetables daily.",
    "Stretch regularly to maintain flexibility and prevent muscle tension.",
    "Regular hand washing is one of the best ways to prevent illness.",
];

const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "unconscious",
    "severe bleeding",
    "stroke",
    "heart attack",
    "seizure",
];

const URGENT_ADVICE: &str = "URGENT: Your symptoms suggest a potentially serious condition. \
Please seek immediate medical attention or call emergency services. While waiting for help: \
stay calm, rest, and have someone stay with you if possible.";

struct Condition {
    keywords: &'static [&'static str],
    advice: &'static str,
}

// Checked in order; the first matching group wins.
const MODERATE_CONDITIONS: &[Condition] = &[
    Condition {
        keywords: &["fever", "chills", "body ache"],
        advice: "You may have a viral infection. Rest, stay hydrated, and take over-the-counter \
fever reducers if needed. Monitor your temperature and seek medical attention if fever persists \
over 3 days or exceeds 103°F (39.4°C).",
    },
    Condition {
        keywords: &["headache", "migraine", "vision"],
        advice: "For headaches, rest in a quiet, dark room. Try over-the-counter pain relievers. \
If you experience severe headaches with vision changes or persistent migraines, consult a \
healthcare provider.",
    },
    Condition {
        keywords: &["cough", "sore throat", "congestion"],
        advice: "You may have an upper respiratory infection. Get plenty of rest, stay hydrated, \
use throat lozenges, and consider over-the-counter cold medications. If symptoms worsen or \
persist beyond a week, see a doctor.",
    },
    Condition {
        keywords: &["nausea", "vomiting", "diarrhea"],
        advice: "Focus on staying hydrated with small sips of water or electrolyte solutions. \
Stick to bland foods like bananas, rice, and toast. If symptoms persist beyond 24 hours or you \
show signs of dehydration, seek medical care.",
    },
    Condition {
        keywords: &["rash", "itching", "skin"],
        advice: "Avoid scratching and use calamine lotion or hydrocortisone cream. Take an \
antihistamine if allergies are suspected. If the rash spreads or is accompanied by fever, \
consult a healthcare provider.",
    },
];

pub fn random_tip() -> &'static str {
    HEALTH_TIPS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(HEALTH_TIPS[0])
}

pub fn analyze_symptoms(symptoms: &str) -> HealthAdvice {
    let lowered = symptoms.to_lowercase();

    if EMERGENCY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        return HealthAdvice {
            advice: URGENT_ADVICE.to_string(),
            severity: Severity::High,
            seek_medical_attention: true,
        };
    }

    if let Some(condition) = MODERATE_CONDITIONS
        .iter()
        .find(|condition| condition.keywords.iter().any(|keyword| lowered.contains(keyword)))
    {
        return HealthAdvice {
            advice: format!("{}\n\n{}", condition.advice, random_tip()),
            severity: Severity::Medium,
            seek_medical_attention: true,
        };
    }

    HealthAdvice {
        advice: format!(
            "Based on your symptoms ({}), your condition appears mild. Rest, stay hydrated, and \
monitor your symptoms. If they persist or worsen after 24-48 hours, consult a healthcare \
provider.\n\nHealth Tip: {}",
            symptoms,
            random_tip()
        ),
        severity: Severity::Low,
        seek_medical_attention: false,
    }
}

pub fn water_intake_advice(today_total: u64, target: u32) -> &'static str {
    let progress = if target == 0 {
        100.0
    } else {
        today_total as f64 / f64::from(target) * 100.0
    };

    if progress < 30.0 {
        "You're significantly behind on your water intake. Try to drink a glass of water now."
    } else if progress < 60.0 {
        "You're about halfway to your daily water goal. Keep drinking regularly!"
    } else if progress < 90.0 {
        "Good progress on water intake! A few more glasses to reach your goal."
    } else {
        "Excellent! You've met your daily water intake goal."
    }
}

/// Source of symptom advice: the keyword table, or an LLM when an API key is configured.
#[derive(Clone)]
pub enum HealthAdvisor {
    RuleBased,
    OpenAi(OpenAiAdvisor),
}

impl HealthAdvisor {
    pub fn openai(api_key: String, model: String, base_url: String) -> Self {
        HealthAdvisor::OpenAi(OpenAiAdvisor::new(api_key, model).with_base_url(base_url))
    }

    pub async fn advise(&self, symptoms: &str) -> Result<HealthAdvice> {
        match self {
            HealthAdvisor::RuleBased => Ok(analyze_symptoms(symptoms)),
            HealthAdvisor::OpenAi(client) => client.advise(symptoms).await,
        }
    }
}
