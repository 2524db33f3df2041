use crate::ingest::ImageTarget;
use crate::settings::{ProjectSlot, Settings, SettingsPatch};

/// Unsaved edits in the admin console. The store is only touched on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminForm {
    pub hero_image: String,
    pub profile_image: String,
    pub projects: [ProjectSlot; 3],
    pub standard_pdf_link: String,
    pub premium_pdf_link: String,
}

impl AdminForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hero_image: settings.hero_image.clone(),
            profile_image: settings.profile_image.clone(),
            projects: [
                settings.project1.clone(),
                settings.project2.clone(),
                settings.project3.clone(),
            ],
            standard_pdf_link: settings.standard_pdf_link.clone(),
            premium_pdf_link: settings.premium_pdf_link.clone(),
        }
    }

    /// Drops every unsaved edit by re-reading the committed settings.
    pub fn reset(&mut self, committed: &Settings) {
        *self = Self::from_settings(committed);
    }

    pub fn is_dirty(&self, committed: &Settings) -> bool {
        *self != Self::from_settings(committed)
    }

    pub fn set_image(&mut self, target: ImageTarget, data_uri: String) {
        match target {
            ImageTarget::Profile => self.profile_image = data_uri,
            ImageTarget::Hero => self.hero_image = data_uri,
            ImageTarget::Project(n @ 1..=3) => self.projects[usize::from(n) - 1].image = data_uri,
            ImageTarget::Project(n) => {
                log::warn!("[admin] no project slot {} for ingested image", n);
            }
        }
    }

    pub fn image(&self, target: ImageTarget) -> &str {
        match target {
            ImageTarget::Profile => &self.profile_image,
            ImageTarget::Hero => &self.hero_image,
            ImageTarget::Project(n @ 1..=3) => &self.projects[usize::from(n) - 1].image,
            ImageTarget::Project(_) => "",
        }
    }

    /// Only the fields that differ from `committed`; a touched project slot is sent whole.
    pub fn to_patch(&self, committed: &Settings) -> SettingsPatch {
        let changed = |form: &String, current: &String| (form != current).then(|| form.clone());
        let mut patch = SettingsPatch {
            hero_image: changed(&self.hero_image, &committed.hero_image),
            profile_image: changed(&self.profile_image, &committed.profile_image),
            standard_pdf_link: changed(&self.standard_pdf_link, &committed.standard_pdf_link),
            premium_pdf_link: changed(&self.premium_pdf_link, &committed.premium_pdf_link),
            ..Default::default()
        };
        for (n, slot) in (1u8..).zip(self.projects.iter()) {
            if committed.project(n) != Some(slot) {
                patch.set_project(n, slot.clone());
            }
        }
        patch
    }
}
