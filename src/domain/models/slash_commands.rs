#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_model_list()
            || cmd.is_model_set()
            || cmd.is_temperature()
            || cmd.is_reset()
            || cmd.is_project()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command, joined back together. Provider labels
    /// such as "Claude 3.5 Sonnet" contain spaces.
    pub fn arg_text(&self) -> String {
        return self.args.join(" ");
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_model_list(&self) -> bool {
        return ["/ml", "/models", "/modellist"].contains(&self.command.as_str());
    }

    pub fn is_model_set(&self) -> bool {
        return ["/m", "/model"].contains(&self.command.as_str());
    }

    pub fn is_temperature(&self) -> bool {
        return ["/t", "/temp", "/temperature"].contains(&self.command.as_str());
    }

    pub fn is_reset(&self) -> bool {
        return ["/reset", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_project(&self) -> bool {
        return ["/p", "/project"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
