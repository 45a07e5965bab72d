#[cfg(test)]
#[path = "project_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display,
)]
pub enum Project {
    #[default]
    #[strum(serialize = "Home")]
    Home,
    #[strum(serialize = "金融調査員")]
    FinancialResearcher,
    #[strum(serialize = "医者")]
    Doctor,
    #[strum(serialize = "プロエンジニア")]
    ProEngineer,
}

impl Project {
    /// Accepts the project name or its 1-based index from `/project`.
    pub fn parse(text: &str) -> Option<Project> {
        let text = text.trim();
        if let Ok(idx) = text.parse::<usize>() {
            if idx < 1 {
                return None;
            }
            return Project::iter().nth(idx - 1);
        }

        return Project::iter().find(|e| return e.to_string().eq_ignore_ascii_case(text));
    }

    /// Reference material the project works against.
    pub fn data(&self) -> &'static str {
        match self {
            Project::FinancialResearcher => return "データ1: 金融レポート",
            Project::Doctor => return "データ2: 医療論文",
            Project::ProEngineer => return "データ3: Pythonチュートリアル",
            Project::Home => return "エンジニアファイル",
        }
    }

    pub fn headline(&self) -> String {
        if *self == Project::Home {
            return "Home - ALTAM SOFTWARE OF LLM. Welcome to ALTAMGPT! Select a project with /project."
                .to_string();
        }

        return format!("{self} - this project uses {}", self.data());
    }
}
