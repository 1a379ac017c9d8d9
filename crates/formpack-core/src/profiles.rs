//! Canned extraction rules for the product's builders.
//!
//! Each profile mirrors the corresponding builder's form schema: which
//! collections are repeating groups, where files live inside them, and which
//! top-level fields carry a single image.

use crate::rules::ExtractionRules;

/// Business-website builder: service/product/gallery/testimonial groups with
/// per-item images, FAQ and social-link groups without, and three top-level
/// images.
pub fn biz() -> ExtractionRules {
    ExtractionRules::new()
        .group_with_file("gallery_images", "image")
        .group("faqs")
        .group("social_links")
        .group_with_file("services", "image")
        .group_with_file("products", "image")
        .group_with_file("testimonials", "avatar")
        .file("logo")
        .file("hero_image")
        .file("about_image")
}

/// Linktree builder: an ordered link list with per-link images plus the
/// profile logo.
pub fn linktree() -> ExtractionRules {
    ExtractionRules::new()
        .group("social_links")
        .group_with_file("links", "image")
        .file("logo")
}

/// Portfolio builder: ordered sections only, no file-bearing fields.
pub fn portfolio() -> ExtractionRules {
    ExtractionRules::new()
        .group("work_experiences")
        .group("education")
        .group("showcases")
        .group("skills")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biz_profile_rules() {
        let rules = biz();
        assert_eq!(rules.group_rule("services").unwrap().file_field(), Some("image"));
        assert_eq!(
            rules.group_rule("testimonials").unwrap().file_field(),
            Some("avatar")
        );
        assert_eq!(rules.group_rule("faqs").unwrap().file_field(), None);
        assert!(rules.has_file_rule("logo"));
        assert!(rules.has_file_rule("about_image"));
    }

    #[test]
    fn test_portfolio_profile_has_no_files() {
        let rules = portfolio();
        assert!(rules.files().is_empty());
        assert!(rules.groups().iter().all(|g| g.file_field().is_none()));
    }
}
