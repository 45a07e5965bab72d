use super::Project;

#[test]
fn it_defaults_to_home() {
    assert_eq!(Project::default(), Project::Home);
}

#[test]
fn it_parses_by_name() {
    assert_eq!(Project::parse("医者"), Some(Project::Doctor));
    assert_eq!(Project::parse("home"), Some(Project::Home));
}

#[test]
fn it_parses_by_index() {
    assert_eq!(Project::parse("2"), Some(Project::FinancialResearcher));
    assert_eq!(Project::parse("4"), Some(Project::ProEngineer));
    assert_eq!(Project::parse("0"), None);
    assert_eq!(Project::parse("5"), None);
}

#[test]
fn it_rejects_unknown_projects() {
    assert_eq!(Project::parse("astronaut"), None);
}

#[test]
fn it_describes_project_data() {
    insta::assert_snapshot!(Project::Doctor.headline(), @"医者 - this project uses データ2: 医療論文");
    assert!(Project::Home.headline().contains("Welcome to ALTAMGPT!"));
}
