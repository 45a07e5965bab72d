pub fn persona_fixture() -> &'static str {
    return "ALTAM is a helpful assistant.";
}

/// Alternating user/assistant turns, oldest first.
pub fn turns_fixture(count: usize) -> Vec<(&'static str, String)> {
    return (0..count)
        .map(|idx| {
            if idx % 2 == 0 {
                return ("user", format!("Question {}", idx / 2 + 1));
            }
            return ("assistant", format!("Answer {}", idx / 2 + 1));
        })
        .collect();
}

pub fn openai_completion_fixture(text: &str) -> String {
    return format!(
        r#"{{"id":"chatcmpl-123","object":"chat.completion","choices":[{{"index":0,"message":{{"role":"assistant","content":"{text}"}},"finish_reason":"stop"}}],"usage":{{"prompt_tokens":9,"completion_tokens":12,"total_tokens":21}}}}"#
    );
}

pub fn claude_completion_fixture(text: &str) -> String {
    return format!(
        r#"{{"id":"msg_01","type":"message","role":"assistant","content":[{{"type":"text","text":"{text}"}}],"stop_reason":"end_turn","usage":{{"input_tokens":10,"output_tokens":8}}}}"#
    );
}

pub fn gemini_completion_fixture(text: &str) -> String {
    return format!(
        r#"{{"candidates":[{{"content":{{"parts":[{{"text":"{text}"}}],"role":"model"}},"finishReason":"STOP","index":0}}]}}"#
    );
}
