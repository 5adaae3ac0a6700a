//! Per-variant copy tables.
//!
//! Variants differ only in wording and branding; the controllers are shared.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Language::En),
            "pt" => Some(Language::Pt),
            _ => None,
        }
    }

    /// Match a locale tag (`pt-BR`, `en_US`) by its language prefix.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let prefix = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&prefix)
    }

    pub fn badge(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopySet {
    #[default]
    AppFeedback,
    BumbleBee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyTable {
    pub brand: &'static str,
    pub brand_mark: &'static str,
    pub tagline: &'static str,
    pub credit_unit: &'static str,
    pub download_notice: Option<&'static str>,
    pub latest_version: &'static str,
    pub wishlist_tab: &'static str,
    pub bug_tab: &'static str,
    pub total_items: &'static str,
    pub completed: &'static str,
    pub contributors: &'static str,
    pub wishlist_heading: &'static str,
    pub bug_heading: &'static str,
    pub top_ranked: &'static str,
    pub most_votes: &'static str,
    pub most_recent: &'static str,
    pub no_features: &'static str,
    pub no_bugs: &'static str,
    pub be_first: &'static str,
    pub form_heading_idea: &'static str,
    pub form_heading_bug: &'static str,
    pub idea: &'static str,
    pub bug: &'static str,
    pub platform: &'static str,
    pub both: &'static str,
    pub title: &'static str,
    pub title_placeholder_idea: &'static str,
    pub title_placeholder_bug: &'static str,
    pub description: &'static str,
    pub what_happened: &'static str,
    pub desc_placeholder_idea: &'static str,
    pub desc_placeholder_bug: &'static str,
    pub steps_to_reproduce: &'static str,
    pub steps_placeholder: &'static str,
    pub handle_label: &'static str,
    pub handle_placeholder: &'static str,
    pub submitting: &'static str,
    pub submit_idea: &'static str,
    pub submit_bug: &'static str,
    pub top_contributors: &'static str,
    pub no_contributors: &'static str,
    pub submissions: &'static str,
    pub ranking_heading: &'static str,
    pub loading_algorithm: &'static str,
    pub view_on_github: &'static str,
    pub bug_reported: &'static str,
    pub thanks_feedback: &'static str,
    pub comments: &'static str,
    pub comment_placeholder: &'static str,
    pub add_comment: &'static str,
    pub no_comments: &'static str,
    pub language_switch_hint: &'static str,
}

pub const APPFEEDBACK_EN: CopyTable = CopyTable {
    brand: "AppFeedback",
    brand_mark: "AF",
    tagline: "by B2Bee",
    credit_unit: "credits",
    download_notice: None,
    latest_version: "latest version",
    wishlist_tab: "Wishlist",
    bug_tab: "Bug Hunt",
    total_items: "Total Items",
    completed: "Completed",
    contributors: "Contributors",
    wishlist_heading: "Feature Requests",
    bug_heading: "Bug Reports",
    top_ranked: "Top Ranked",
    most_votes: "Most Votes",
    most_recent: "Most Recent",
    no_features: "No feature requests yet",
    no_bugs: "No bug reports yet",
    be_first: "Be the first to submit one!",
    form_heading_idea: "Submit Feedback",
    form_heading_bug: "Submit Feedback",
    idea: "Feature",
    bug: "Bug",
    platform: "Platform",
    both: "Both",
    title: "Title",
    title_placeholder_idea: "Brief summary...",
    title_placeholder_bug: "Brief summary...",
    description: "Description",
    what_happened: "Description",
    desc_placeholder_idea: "Describe in detail...",
    desc_placeholder_bug: "Describe in detail...",
    steps_to_reproduce: "Steps to reproduce (optional)",
    steps_placeholder: "1. Opened the app\n2. Clicked on...",
    handle_label: "X Handle (optional)",
    handle_placeholder: "@yourhandle",
    submitting: "Submitting...",
    submit_idea: "Submit Feedback",
    submit_bug: "Submit Feedback",
    top_contributors: "Top Contributors",
    no_contributors: "No contributors yet",
    submissions: "submissions",
    ranking_heading: "Ranking Algorithm",
    loading_algorithm: "Loading algorithm...",
    view_on_github: "View on GitHub",
    bug_reported: "Bug reported successfully!",
    thanks_feedback: "Thanks for the feedback!",
    comments: "comments",
    comment_placeholder: "Add a comment...",
    add_comment: "Comment",
    no_comments: "No comments yet",
    language_switch_hint: "Switch language",
};

pub const BUMBLEBEE_EN: CopyTable = CopyTable {
    brand: "BumbleBee",
    brand_mark: "B",
    tagline: "Voice AI Assistant for Mac & Windows",
    credit_unit: "honey",
    download_notice: Some("We're constantly improving! Make sure you have the"),
    latest_version: "latest version",
    wishlist_tab: "Feature Requests",
    bug_tab: "Bug Reports",
    total_items: "Total Feedback",
    completed: "Shipped",
    contributors: "Contributors",
    wishlist_heading: "What should BumbleBee do next?",
    bug_heading: "Help us squash bugs",
    top_ranked: "Top Ranked",
    most_votes: "Most Votes",
    most_recent: "Most Recent",
    no_features: "No feature requests yet",
    no_bugs: "No bug reports yet",
    be_first: "Be the first to help shape BumbleBee!",
    form_heading_idea: "Share Idea",
    form_heading_bug: "Report Bug",
    idea: "Idea",
    bug: "Bug",
    platform: "Platform",
    both: "Both",
    title: "Title",
    title_placeholder_idea: "E.g.: Add calendar integration...",
    title_placeholder_bug: "E.g.: App crashes when opening...",
    description: "Description",
    what_happened: "What happened?",
    desc_placeholder_idea: "Describe your idea for BumbleBee...",
    desc_placeholder_bug: "Describe the problem you encountered...",
    steps_to_reproduce: "Steps to reproduce (optional)",
    steps_placeholder: "1. Opened the app\n2. Clicked on...\n3. App crashed",
    handle_label: "Your name or X/Twitter (optional)",
    handle_placeholder: "@yourhandle or your name",
    submitting: "Submitting...",
    submit_idea: "Submit Idea (+10 honey)",
    submit_bug: "Report Bug (+15 honey)",
    top_contributors: "Top Contributors",
    no_contributors: "No contributors yet",
    submissions: "submissions",
    ranking_heading: "How Ranking Works",
    loading_algorithm: "Loading...",
    view_on_github: "View on GitHub",
    bug_reported: "Bug reported successfully!",
    thanks_feedback: "Thanks for the feedback!",
    comments: "comments",
    comment_placeholder: "Add a comment...",
    add_comment: "Comment",
    no_comments: "No comments yet",
    language_switch_hint: "Mudar para Portugues",
};

pub const BUMBLEBEE_PT: CopyTable = CopyTable {
    brand: "BumbleBee",
    brand_mark: "B",
    tagline: "Assistente de voz AI para Mac e Windows",
    credit_unit: "honey",
    download_notice: Some("Estamos sempre melhorando! Certifique-se de ter a"),
    latest_version: "versao mais recente",
    wishlist_tab: "Pedidos de Recursos",
    bug_tab: "Relatorios de Bugs",
    total_items: "Total de Feedback",
    completed: "Entregues",
    contributors: "Contribuidores",
    wishlist_heading: "O que o BumbleBee deveria fazer a seguir?",
    bug_heading: "Ajude-nos a corrigir bugs",
    top_ranked: "Mais Bem Classificados",
    most_votes: "Mais Votos",
    most_recent: "Mais Recentes",
    no_features: "Nenhum pedido de recurso ainda",
    no_bugs: "Nenhum relatorio de bug ainda",
    be_first: "Seja o primeiro a ajudar a moldar o BumbleBee!",
    form_heading_idea: "Compartilhar Ideia",
    form_heading_bug: "Reportar Bug",
    idea: "Ideia",
    bug: "Bug",
    platform: "Plataforma",
    both: "Ambos",
    title: "Titulo",
    title_placeholder_idea: "Ex: Adicionar integracao com calendario...",
    title_placeholder_bug: "Ex: App trava ao abrir...",
    description: "Descricao",
    what_happened: "O que aconteceu?",
    desc_placeholder_idea: "Descreva sua ideia para o BumbleBee...",
    desc_placeholder_bug: "Descreva o problema que encontrou...",
    steps_to_reproduce: "Passos para reproduzir (opcional)",
    steps_placeholder: "1. Abri o app\n2. Cliquei em...\n3. O app travou",
    handle_label: "Seu nome ou X/Twitter (opcional)",
    handle_placeholder: "@seuhandle ou seu nome",
    submitting: "Enviando...",
    submit_idea: "Enviar Ideia (+10 honey)",
    submit_bug: "Reportar Bug (+15 honey)",
    top_contributors: "Top Contribuidores",
    no_contributors: "Nenhum contribuidor ainda",
    submissions: "envios",
    ranking_heading: "Como Funciona o Ranking",
    loading_algorithm: "Carregando...",
    view_on_github: "Ver no GitHub",
    bug_reported: "Bug reportado com sucesso!",
    thanks_feedback: "Obrigado pelo feedback!",
    comments: "comentarios",
    comment_placeholder: "Adicionar um comentario...",
    add_comment: "Comentar",
    no_comments: "Nenhum comentario ainda",
    language_switch_hint: "Switch to English",
};

/// Wording of the download/auth landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingCopy {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub download_heading: &'static str,
    pub download_subtitle: &'static str,
    pub signup_heading: &'static str,
    pub signup_placeholder: &'static str,
    pub signup_button: &'static str,
    pub login_tab: &'static str,
    pub signup_tab: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub create_account: &'static str,
    pub sign_in: &'static str,
    pub working: &'static str,
    pub auth_error: &'static str,
    pub api_key_heading: &'static str,
    pub api_key_hint: &'static str,
    pub copy_key: &'static str,
    pub logout: &'static str,
}

pub const LANDING_PT: LandingCopy = LandingCopy {
    brand: "BumbleBee",
    tagline: "Seu assistente de voz AI para Mac e Windows",
    download_heading: "Baixe o BumbleBee Gratis",
    download_subtitle: "Disponivel para Windows e macOS",
    signup_heading: "Receba novidades antes de baixar",
    signup_placeholder: "seu@email.com",
    signup_button: "Continuar",
    login_tab: "Entrar",
    signup_tab: "Criar Conta",
    email: "Email",
    password: "Senha",
    name: "Nome",
    create_account: "Criar Conta",
    sign_in: "Entrar",
    working: "Aguarde...",
    auth_error: "Erro na autenticacao. Tente novamente.",
    api_key_heading: "Sua API Key",
    api_key_hint: "Cole esta chave no app BumbleBee para conectar sua conta.",
    copy_key: "Copiar",
    logout: "Sair",
};

pub fn copy_table(set: CopySet, language: Language) -> &'static CopyTable {
    match (set, language) {
        (CopySet::AppFeedback, _) => &APPFEEDBACK_EN,
        (CopySet::BumbleBee, Language::En) => &BUMBLEBEE_EN,
        (CopySet::BumbleBee, Language::Pt) => &BUMBLEBEE_PT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_prefix_selects_language() {
        assert_eq!(Language::from_locale("pt-BR"), Some(Language::Pt));
        assert_eq!(Language::from_locale("PT"), Some(Language::Pt));
        assert_eq!(Language::from_locale("en_GB"), Some(Language::En));
        assert_eq!(Language::from_locale("de-DE"), None);
        assert_eq!(Language::from_locale(""), None);
    }

    #[test]
    fn appfeedback_ignores_language() {
        assert_eq!(
            copy_table(CopySet::AppFeedback, Language::Pt),
            copy_table(CopySet::AppFeedback, Language::En)
        );
    }

    #[test]
    fn bumblebee_switches_tables() {
        assert_eq!(copy_table(CopySet::BumbleBee, Language::Pt).comments, "comentarios");
        assert_eq!(copy_table(CopySet::BumbleBee, Language::En).comments, "comments");
    }
}
