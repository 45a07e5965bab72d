use anyhow::Result;

use super::build;

#[test]
fn it_builds_a_valid_command() {
    build().debug_assert();
}

#[test]
fn it_accepts_known_providers() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "altam",
        "chat",
        "--provider",
        "Claude 3.5 Sonnet",
        "--temperature",
        "1.1",
    ])?;
    let (name, chat_matches) = matches.subcommand().unwrap();

    assert_eq!(name, "chat");
    assert_eq!(
        chat_matches.get_one::<String>("provider").unwrap(),
        "Claude 3.5 Sonnet"
    );
    assert_eq!(chat_matches.get_one::<String>("temperature").unwrap(), "1.1");

    return Ok(());
}

#[test]
fn it_rejects_unknown_providers() {
    let res = build().try_get_matches_from(vec!["altam", "--provider", "Llama"]);
    assert!(res.is_err());
}

#[test]
fn it_accepts_projects_by_name() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["altam", "--project", "医者"])?;
    assert_eq!(matches.get_one::<String>("project").unwrap(), "医者");

    return Ok(());
}
