//! Chapter mood categories and their display attributes.

/// Display attributes for one mood category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VibeStyle {
    /// Background gradient classes for the chapter section.
    pub gradient: &'static str,
    pub icon: &'static str,
    /// Rail dot fill, ring and label colours.
    pub bg: &'static str,
    pub ring: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vibe {
    Normalcy,
    HighAlert,
    Chaos,
    Isolation,
    HopeAttrition,
    HopeJoy,
    Conflict,
}

const NORMALCY: VibeStyle = VibeStyle {
    gradient: "from-blue-50 to-transparent",
    icon: "🌤",
    bg: "#dbeafe",
    ring: "#3b82f6",
    text: "#1e40af",
};

const HIGH_ALERT: VibeStyle = VibeStyle {
    gradient: "from-amber-50 to-transparent",
    icon: "⚡",
    bg: "#fef3c7",
    ring: "#f59e0b",
    text: "#92400e",
};

const CHAOS: VibeStyle = VibeStyle {
    gradient: "from-red-50 to-transparent",
    icon: "🔥",
    bg: "#fee2e2",
    ring: "#ef4444",
    text: "#991b1b",
};

const ISOLATION: VibeStyle = VibeStyle {
    gradient: "from-indigo-50 to-transparent",
    icon: "🌑",
    bg: "#e0e7ff",
    ring: "#6366f1",
    text: "#3730a3",
};

const HOPE_ATTRITION: VibeStyle = VibeStyle {
    gradient: "from-emerald-50 to-transparent",
    icon: "🛡️",
    bg: "#d1fae5",
    ring: "#10b981",
    text: "#065f46",
};

const HOPE_JOY: VibeStyle = VibeStyle {
    gradient: "from-yellow-50 to-transparent",
    icon: "💉",
    bg: "#fef9c3",
    ring: "#eab308",
    text: "#713f12",
};

const CONFLICT: VibeStyle = VibeStyle {
    gradient: "from-pink-50 to-transparent",
    icon: "⚖️",
    bg: "#fce7f3",
    ring: "#ec4899",
    text: "#9d174d",
};

/// Neutral section styling with the Normalcy rail colours.
pub const FALLBACK_STYLE: VibeStyle = VibeStyle {
    gradient: "from-stone-50 to-transparent",
    icon: "📖",
    ..NORMALCY
};

impl Vibe {
    pub const ALL: [Vibe; 7] = [
        Vibe::Normalcy,
        Vibe::HighAlert,
        Vibe::Chaos,
        Vibe::Isolation,
        Vibe::HopeAttrition,
        Vibe::HopeJoy,
        Vibe::Conflict,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL.into_iter().find(|v| v.as_tag() == tag)
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Normalcy => "Normalcy / Low-Alert",
            Self::HighAlert => "High-Alert / Acceleration",
            Self::Chaos => "Chaos / Urgency",
            Self::Isolation => "Isolation / Grief",
            Self::HopeAttrition => "Hope / Attrition",
            Self::HopeJoy => "Hope / Joy",
            Self::Conflict => "Conflict / Vindication",
        }
    }

    pub fn style(&self) -> &'static VibeStyle {
        match self {
            Self::Normalcy => &NORMALCY,
            Self::HighAlert => &HIGH_ALERT,
            Self::Chaos => &CHAOS,
            Self::Isolation => &ISOLATION,
            Self::HopeAttrition => &HOPE_ATTRITION,
            Self::HopeJoy => &HOPE_JOY,
            Self::Conflict => &CONFLICT,
        }
    }
}

/// Style for a raw content tag, [`FALLBACK_STYLE`] when the tag is unknown.
pub fn vibe_style(tag: &str) -> &'static VibeStyle {
    Vibe::from_tag(tag).map_or(&FALLBACK_STYLE, |v| v.style())
}
