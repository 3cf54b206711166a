use super::common::*;
use crate::board::domain::{ExperienceLevel, JobType};
use crate::board::seed::starter_jobs;
use crate::board::view::{derive_view, location_options, SortKey, UnknownSortKey, ViewConfig};

#[test]
fn empty_config_returns_everything_newest_first() {
    let jobs = starter_jobs();
    let view = derive_view(&jobs, &ViewConfig::default());

    assert_eq!(view.len(), jobs.len());
    assert_eq!(ids(&view), vec!["6", "1", "2", "3", "4", "5"]);
}

#[test]
fn salary_sort_is_descending_and_stable() {
    let jobs = starter_jobs();
    let config = ViewConfig {
        sort: SortKey::SalaryDesc,
        ..ViewConfig::default()
    };

    let view = derive_view(&jobs, &config);
    assert_eq!(ids(&view), vec!["2", "1", "4", "3", "5", "6"]);
    assert!(view
        .windows(2)
        .all(|pair| pair[0].salary_max >= pair[1].salary_max));
}

#[test]
fn date_sort_keeps_input_order_for_equal_timestamps() {
    let jobs = vec![
        posting("a", JobType::FullTime, "Remote", 100, "2024-07-01T00:00:00Z"),
        posting("b", JobType::FullTime, "Remote", 300, "2024-07-02T00:00:00Z"),
        posting("c", JobType::FullTime, "Remote", 200, "2024-07-01T00:00:00Z"),
        posting("d", JobType::FullTime, "Remote", 300, "2024-07-01T00:00:00Z"),
    ];

    let by_date = derive_view(&jobs, &ViewConfig::default());
    assert_eq!(ids(&by_date), vec!["b", "a", "c", "d"]);

    let by_salary = derive_view(
        &jobs,
        &ViewConfig {
            sort: SortKey::SalaryDesc,
            ..ViewConfig::default()
        },
    );
    assert_eq!(ids(&by_salary), vec!["b", "d", "c", "a"]);
}

#[test]
fn selection_filters_are_sound_and_complete() {
    let jobs = starter_jobs();

    for job_type in JobType::ALL {
        let mut config = ViewConfig::default();
        config.toggle_job_type(job_type);
        let view = derive_view(&jobs, &config);

        assert!(view.iter().all(|job| job.job_type == job_type));
        let expected = jobs.iter().filter(|job| job.job_type == job_type).count();
        assert_eq!(view.len(), expected, "type {job_type}");
    }

    for level in ExperienceLevel::ALL {
        let mut config = ViewConfig::default();
        config.toggle_experience(level);
        let view = derive_view(&jobs, &config);

        assert!(view.iter().all(|job| job.experience_level == level));
        let expected = jobs
            .iter()
            .filter(|job| job.experience_level == level)
            .count();
        assert_eq!(view.len(), expected, "level {level}");
    }

    for location in location_options(&jobs) {
        let mut config = ViewConfig::default();
        config.toggle_location(location.clone());
        let view = derive_view(&jobs, &config);

        assert!(view.iter().all(|job| job.location == location));
        let expected = jobs.iter().filter(|job| job.location == location).count();
        assert_eq!(view.len(), expected, "location {location}");
    }
}

#[test]
fn filters_combine_as_intersection_of_unions() {
    let jobs = starter_jobs();
    let mut config = ViewConfig::default();
    config.toggle_job_type(JobType::FullTime);
    config.toggle_job_type(JobType::Contract);
    config.toggle_location("New York, NY");
    config.toggle_location("Berlin, Germany");

    let view = derive_view(&jobs, &config);
    assert_eq!(ids(&view), vec!["6", "2", "5"]);

    config.toggle_experience(ExperienceLevel::Mid);
    let view = derive_view(&jobs, &config);
    assert_eq!(ids(&view), vec!["2", "5"]);
}

#[test]
fn search_is_case_insensitive_across_title_company_and_tags() {
    let jobs = starter_jobs();
    let search = |term: &str| {
        let config = ViewConfig {
            search: term.to_string(),
            ..ViewConfig::default()
        };
        derive_view(&jobs, &config)
    };

    assert_eq!(search("REACT"), search("react"));
    assert_eq!(ids(&search("react")), vec!["6", "1"]);
    assert_eq!(ids(&search("techcorp")), vec!["1"]);
    assert_eq!(ids(&search("Engineer")), vec!["6", "5"]);
    assert!(search("cobol").is_empty());
}

#[test]
fn search_combines_with_filters() {
    let jobs = starter_jobs();
    let mut config = ViewConfig {
        search: "react".to_string(),
        ..ViewConfig::default()
    };
    config.toggle_experience(ExperienceLevel::Entry);

    assert_eq!(ids(&derive_view(&jobs, &config)), vec!["6"]);
}

#[test]
fn derive_view_leaves_input_untouched() {
    let jobs = starter_jobs();
    let before = jobs.clone();
    let config = ViewConfig {
        sort: SortKey::SalaryDesc,
        search: "e".to_string(),
        ..ViewConfig::default()
    };

    let _ = derive_view(&jobs, &config);
    assert_eq!(jobs, before);
}

#[test]
fn toggles_and_clear_keep_search_and_sort() {
    let mut config = ViewConfig {
        search: "data".to_string(),
        sort: SortKey::SalaryDesc,
        ..ViewConfig::default()
    };
    assert!(!config.has_active_filters());

    config.toggle_job_type(JobType::Remote);
    config.toggle_location("Remote");
    assert!(config.has_active_filters());

    config.toggle_job_type(JobType::Remote);
    assert!(config.job_types.is_empty());
    assert!(config.has_active_filters());

    config.clear_filters();
    assert!(!config.has_active_filters());
    assert_eq!(config.search, "data");
    assert_eq!(config.sort, SortKey::SalaryDesc);
}

#[test]
fn location_options_are_distinct_and_sorted() {
    assert_eq!(
        location_options(&starter_jobs()),
        vec![
            "Berlin, Germany",
            "London, UK",
            "New York, NY",
            "Remote",
            "San Francisco, CA",
        ]
    );
}

#[test]
fn sort_keys_parse_from_their_wire_names() {
    assert_eq!("date-desc".parse::<SortKey>(), Ok(SortKey::DateDesc));
    assert_eq!("salary-desc".parse::<SortKey>(), Ok(SortKey::SalaryDesc));
    assert_eq!(
        "salary-asc".parse::<SortKey>(),
        Err(UnknownSortKey("salary-asc".to_string()))
    );
    assert_eq!(SortKey::default(), SortKey::DateDesc);
    assert_eq!(SortKey::SalaryDesc.to_string(), "salary-desc");
}
