use eframe::egui::Color32;

// Cyber-noir palette, taken from the web build's tailwind classes.
pub const PAGE_BG: Color32 = Color32::from_rgb(0x05, 0x05, 0x05);
pub const PANEL_BG: Color32 = Color32::from_rgb(0x0c, 0x0c, 0x0c);
pub const CARD_BG: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b);
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a);
pub const INPUT_BG: Color32 = Color32::from_rgb(0x13, 0x13, 0x16);
pub const TEXT_COLOR: Color32 = Color32::from_rgb(0xf4, 0xf4, 0xf5);
pub const TEXT_SOFT: Color32 = Color32::from_rgb(0xd4, 0xd4, 0xd8);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a);
pub const TEXT_FAINT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46);
pub const TEAL: Color32 = Color32::from_rgb(0x14, 0xb8, 0xa6);
pub const TEAL_HOVER: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf);
pub const TEAL_DIM: Color32 = Color32::from_rgb(0x0d, 0x3b, 0x37);
pub const ORANGE: Color32 = Color32::from_rgb(0xf9, 0x73, 0x16);
pub const GREEN: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e);
pub const RED: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

#[derive(Clone, Copy)]
pub struct ProjectCard {
    pub title: &'static str,
    pub tag: &'static str,
    pub desc: &'static str,
    pub color: Color32,
}

pub const PROJECT_CARDS: [ProjectCard; 3] = [
    ProjectCard {
        title: "Vibe Birthdays",
        tag: "Celebration",
        desc: "Interactive emotional timelines.",
        color: TEAL,
    },
    ProjectCard {
        title: "Noir Protocol",
        tag: "Anniversary",
        desc: "Cyber-noir visual experiences.",
        color: ORANGE,
    },
    ProjectCard {
        title: "Quantum Vibe",
        tag: "Enterprise",
        desc: "High-performance brand visuals.",
        color: TEAL,
    },
];

pub fn status_color(state: &str) -> Color32 {
    match state {
        "error" => RED,
        "busy" => ORANGE,
        "ok" => GREEN,
        _ => TEXT_MUTED,
    }
}
