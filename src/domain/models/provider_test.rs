use super::ProviderProfile;
use super::RequestStyle;

fn profile(credential: &str) -> ProviderProfile {
    return ProviderProfile {
        label: "GPT-3.5".to_string(),
        wire_model_id: "gpt-3.5-turbo".to_string(),
        endpoint: "https://api.openai.com".to_string(),
        credential: credential.to_string(),
        request_style: RequestStyle::OpenAI,
        price_per_input_token: 0.5 / 1_000_000.0,
        price_per_output_token: 1.5 / 1_000_000.0,
    };
}

#[test]
fn it_names_request_styles() {
    assert_eq!(RequestStyle::OpenAI.to_string(), "openai");
    assert_eq!(RequestStyle::RawHttp.to_string(), "raw-http");
}

#[test]
fn it_never_prints_credentials() {
    let res = format!("{:?}", profile("sk-secret"));
    assert!(!res.contains("sk-secret"));
    assert!(res.contains("<redacted>"));
}

#[test]
fn it_marks_missing_credentials() {
    let res = format!("{:?}", profile(""));
    assert!(res.contains("<missing>"));
}

#[test]
fn it_summarizes_prices_per_million_tokens() {
    insta::assert_snapshot!(profile("abc").price_summary(), @"input $0.50/1M tokens, output $1.50/1M tokens");
}
