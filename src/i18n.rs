//! Message catalog for user-facing validation text.
//!
//! Validation results carry message keys, not display strings; handlers
//! resolve them here with the request locale. Unknown locales fall back to
//! English, and a key missing from a localized catalog falls back to its
//! English entry.

use phf::phf_map;

pub static DEFAULT_LOCALE: &str = "en";

/// Stable identifier for a piece of user-facing text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    MustExist,
    AlreadyTaken,
    SameConference,
    VoteAuthor,
    VoteVoter,
    VoteLimitReached,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::MustExist => "errors.must_exist",
            MessageKey::AlreadyTaken => "errors.taken",
            MessageKey::SameConference => "errors.same_conference",
            MessageKey::VoteAuthor => "vote.author",
            MessageKey::VoteVoter => "vote.voter",
            MessageKey::VoteLimitReached => "vote.limit_reached",
        }
    }
}

static EN: phf::Map<&'static str, &'static str> = phf_map! {
    "errors.must_exist" => "must exist",
    "errors.taken" => "has already been taken",
    "errors.same_conference" => "session must belong to the voted conference",
    "vote.author" => "session authors cannot vote for their own session",
    "vote.voter" => "user must be a voter",
    "vote.limit_reached" => "you can only vote {count} times per conference",
};

static PT_BR: phf::Map<&'static str, &'static str> = phf_map! {
    "errors.must_exist" => "deve existir",
    "errors.taken" => "já está em uso",
    "errors.same_conference" => "sessão deve pertencer à conferência votada",
    "vote.author" => "autores não podem votar na própria sessão",
    "vote.voter" => "usuário deve ser um votante",
    "vote.limit_reached" => "você só pode votar {count} vezes por conferência",
};

fn catalog(locale: &str) -> &'static phf::Map<&'static str, &'static str> {
    match locale {
        "pt-BR" | "pt" => &PT_BR,
        _ => &EN,
    }
}

/// Resolves a message key to display text for the given locale.
///
/// `count` fills the `{count}` placeholder where the template has one.
pub fn translate(key: MessageKey, locale: &str, count: Option<u64>) -> String {
    let template = catalog(locale)
        .get(key.as_str())
        .or_else(|| EN.get(key.as_str()))
        .copied()
        .unwrap_or_else(|| key.as_str());

    match count {
        Some(count) => template.replace("{count}", &count.to_string()),
        None => template.to_owned(),
    }
}
