//! Server-rendered pages and the URL rewriting applied to them.
//!
//! The HTML files under the templates directory embed API URLs that were hardcoded
//! during development. Before a page is served, every known placeholder is swapped for
//! the endpoint resolved from the current request.

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::origin::{Endpoints, Origin};

/// Placeholder origins that have been hardcoded into the pages at some point
///
/// Loopback names, alternate local ports, and the partially typed `0.0.0.1`.
pub const LEGACY_ORIGINS: &[&str] = &[
    "http://localhost:8000",
    "http://127.0.0.1:8000",
    "http://localhost:8025",
    "http://127.0.0.1:8025",
    "http://0.0.0.0:8025",
    "http://0.0.0.1:8025",
];

/// String delimiters a quoted placeholder may appear between
const QUOTES: [char; 3] = ['"', '\'', '`'];

/// Substrings that must not survive a rewrite
const INSECURE_LOOPBACK_MARKERS: &[&str] = &["http://localhost", "http://127.0.0.1"];

/// Which resolved URL a replacement refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Base,
    Users,
    Images,
    ImagesSave,
}

impl Endpoint {
    fn resolve(self, endpoints: &Endpoints) -> &str {
        match self {
            Endpoint::Base => &endpoints.base_url,
            Endpoint::Users => &endpoints.users,
            Endpoint::Images => &endpoints.images,
            Endpoint::ImagesSave => &endpoints.images_save,
        }
    }
}

/// How the text matched by a rule is rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// `this.apiUrl = "<endpoint>";`
    Assignment(Endpoint),
    /// `<quote><endpoint><quote>`
    Quoted { quote: char, endpoint: Endpoint },
    /// `<base_url>/`
    OriginPrefix,
}

impl Replacement {
    fn render(self, endpoints: &Endpoints) -> String {
        match self {
            Replacement::Assignment(endpoint) => {
                format!("this.apiUrl = \"{}\";", endpoint.resolve(endpoints))
            }
            Replacement::Quoted { quote, endpoint } => {
                format!("{}{}{}", quote, endpoint.resolve(endpoints), quote)
            }
            Replacement::OriginPrefix => format!("{}/", endpoints.base_url),
        }
    }
}

/// A literal pattern and what to put in its place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: Replacement,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            pattern: pattern.into(),
            replacement,
        }
    }
}

/// Result of rewriting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub html: String,
    /// Rules that matched at least once
    pub rules_matched: usize,
    /// Total occurrences replaced across all rules
    pub replacements: usize,
}

/// Ordered rewrite rules; earlier rules see the document first
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    /// Rules for every known placeholder origin plus any configured extras
    ///
    /// Full `this.apiUrl = "...";` statements come first, then quoted URLs, and the
    /// blind `origin/` prefix swap last, so a contextual match always wins.
    pub fn legacy(extra_origins: &[String]) -> Self {
        let origins: Vec<&str> = LEGACY_ORIGINS
            .iter()
            .copied()
            .chain(extra_origins.iter().map(|o| o.trim_end_matches('/')))
            .collect();

        let mut rules = Vec::with_capacity(origins.len() * 10);

        for origin in &origins {
            rules.push(RewriteRule::new(
                format!("this.apiUrl = \"{}/users/\";", origin),
                Replacement::Assignment(Endpoint::Users),
            ));
            rules.push(RewriteRule::new(
                format!("this.apiUrl = \"{}/images\";", origin),
                Replacement::Assignment(Endpoint::Images),
            ));
            rules.push(RewriteRule::new(
                format!("this.apiUrl = \"{}/images/\";", origin),
                Replacement::Assignment(Endpoint::Images),
            ));
        }
        for (origin, quote) in origins.iter().flat_map(|o| QUOTES.map(|q| (o, q))) {
            rules.push(RewriteRule::new(
                format!("{quote}{origin}/images/save{quote}"),
                Replacement::Quoted {
                    quote,
                    endpoint: Endpoint::ImagesSave,
                },
            ));
        }
        for (origin, quote) in origins.iter().flat_map(|o| QUOTES.map(|q| (o, q))) {
            rules.push(RewriteRule::new(
                format!("{quote}{origin}{quote}"),
                Replacement::Quoted {
                    quote,
                    endpoint: Endpoint::Base,
                },
            ));
        }
        for origin in &origins {
            rules.push(RewriteRule::new(
                format!("{}/", origin),
                Replacement::OriginPrefix,
            ));
        }

        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Apply every rule in order as a literal substring replacement
    pub fn rewrite(&self, document: &str, endpoints: &Endpoints) -> Rewrite {
        let mut html = document.to_string();
        let mut rules_matched = 0;
        let mut replacements = 0;

        for rule in &self.rules {
            let occurrences = html.matches(rule.pattern.as_str()).count();
            if occurrences == 0 {
                continue;
            }

            let replacement = rule.replacement.render(endpoints);
            tracing::debug!(
                "Rewriting {} occurrence(s) of {:?} -> {:?}",
                occurrences,
                rule.pattern,
                replacement
            );
            html = html.replace(rule.pattern.as_str(), &replacement);
            rules_matched += 1;
            replacements += occurrences;
        }

        Rewrite {
            html,
            rules_matched,
            replacements,
        }
    }
}

/// Server-rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Ranking,
    Photos,
    CoctelesRanking,
}

impl Page {
    pub fn file_name(self) -> &'static str {
        match self {
            Page::Ranking => "ranking.html",
            Page::Photos => "photos.html",
            Page::CoctelesRanking => "cocteles_ranking.html",
        }
    }
}

/// Loads pages from disk and rewrites them for the requesting origin
#[derive(Debug, Clone)]
pub struct TemplateRewriter {
    dir: PathBuf,
    rules: RuleSet,
}

impl TemplateRewriter {
    pub fn new(dir: impl Into<PathBuf>, rules: RuleSet) -> Self {
        Self {
            dir: dir.into(),
            rules,
        }
    }

    /// Read the page and rewrite it against `origin`
    ///
    /// A missing or unreadable file fails the whole request; nothing partial is returned.
    pub async fn render(&self, page: Page, origin: &Origin) -> Result<Rewrite> {
        let path = self.dir.join(page.file_name());
        let document = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| AppError::TemplateLoad {
                path: path.clone(),
                source,
            })?;

        let rewrite = self.rules.rewrite(&document, &origin.endpoints());

        tracing::debug!(
            "Rendered {} for {}: {} rule(s) matched, {} replacement(s)",
            page.file_name(),
            origin.base_url(),
            rewrite.rules_matched,
            rewrite.replacements
        );

        for marker in INSECURE_LOOPBACK_MARKERS {
            if rewrite.html.contains(marker) {
                tracing::warn!(
                    "{} still references {} after rewriting; add a rule for the new placeholder",
                    page.file_name(),
                    marker
                );
            }
        }

        Ok(rewrite)
    }
}
