//! The two starting points an editing session can begin from.

use chrono::NaiveDate;

use crate::models::cv::{
    CustomSection, CvData, Entry, PersonalInfo, SectionKind, SectionSettings, StyleSettings,
    Technologies, TechnologyCategory,
};

/// All-empty CV, stamped with `today`.
pub fn empty_cv(today: NaiveDate) -> CvData {
    CvData {
        personal_info: PersonalInfo {
            last_updated: Some(today),
            ..PersonalInfo::default()
        },
        ..CvData::default()
    }
}

/// The bundled sample template: one education entry, one job, three
/// technology categories.
pub fn sample_cv(today: NaiveDate) -> CvData {
    let sections = vec![
        sample_section("1", "Education", SectionKind::Entries, 1),
        sample_section("2", "Experience", SectionKind::Entries, 2),
        sample_section("3", "Technologies", SectionKind::Technologies, 3),
    ];

    let education = Entry {
        id: "1".to_string(),
        left_title: "University of Pennsylvania".to_string(),
        subtitle: "BS in Computer Science".to_string(),
        bullet_points: strings(&[
            "GPA: 3.9/4.0",
            "Coursework: Computer Architecture, Algorithms, Computational Theory",
        ]),
        location: Some(String::new()),
        date_range: Some("Sept 2000 – May 2005".to_string()),
        ..Entry::default()
    };

    let experience = Entry {
        id: "1".to_string(),
        left_title: "Software Engineer".to_string(),
        subtitle: "Apple".to_string(),
        bullet_points: strings(&[
            "Reduced time to render user buddy lists by 75% by implementing prediction algorithm",
            "Integrated iChat with Spotlight Search by creating metadata extraction tool",
        ]),
        location: Some("Cupertino, CA".to_string()),
        date_range: Some("June 2005 – Aug 2007".to_string()),
        ..Entry::default()
    };

    let mut cv = CvData {
        personal_info: PersonalInfo {
            full_name: "John Doe".to_string(),
            location: "Your Location".to_string(),
            email: "youremail@yourdomain.com".to_string(),
            phone: "+1-234-567-8900".to_string(),
            website: "https://yourwebsite.com".to_string(),
            linkedin: "https://linkedin.com/in/yourusername".to_string(),
            github: "https://github.com/yourusername".to_string(),
            last_updated: Some(today),
        },
        technologies: Technologies {
            categories: vec![
                category("1", "Programming Languages", &["C++", "C", "Java", "JavaScript", "Python"]),
                category("2", "Frameworks", &[".NET", "React", "Node.js"]),
                category("3", "Tools", &["Git", "Docker", "VS Code"]),
            ],
        },
        style_settings: StyleSettings {
            footer_text: "John Doe".to_string(),
            ..StyleSettings::default()
        },
        ..CvData::default()
    };

    // Every section owns a (possibly empty) row in both side tables.
    for section in &sections {
        cv.section_entries.insert(section.id.clone(), Vec::new());
        cv.custom_section_fields.insert(section.id.clone(), Vec::new());
    }
    cv.section_entries.insert("1".to_string(), vec![education]);
    cv.section_entries.insert("2".to_string(), vec![experience]);
    cv.custom_sections = sections;
    cv
}

fn sample_section(id: &str, title: &str, kind: SectionKind, order: i64) -> CustomSection {
    CustomSection {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        settings: SectionSettings {
            title: title.to_string(),
            order,
            ..SectionSettings::default()
        },
    }
}

fn category(id: &str, name: &str, items: &[&str]) -> TechnologyCategory {
    TechnologyCategory {
        id: id.to_string(),
        name: name.to_string(),
        items: strings(items),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
