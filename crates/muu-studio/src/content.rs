//! Page copy and link targets.

use std::time::{SystemTime, UNIX_EPOCH};

pub const BRAND: &str = "muu.studio";

/// Where a link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Leaves the page; handed to the OS.
    External(String),
    /// In-page section id, without the `#`.
    Anchor(String),
}

impl LinkTarget {
    /// `#id` becomes an anchor, anything else an external URL.
    pub fn parse(href: &str) -> Self {
        match href.strip_prefix('#') {
            Some(id) => Self::Anchor(id.to_string()),
            None => Self::External(href.to_string()),
        }
    }
}

impl std::fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::External(url) => f.write_str(url),
            Self::Anchor(id) => write!(f, "#{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub brand: String,
    pub headline: Vec<String>,
    pub tagline: String,
    /// Section id of the card grid.
    pub cards_anchor: String,
    pub cards: Vec<Card>,
    pub nav: Vec<NavItem>,
    pub copyright: String,
}

fn card(title: &str, description: &str, href: &str) -> Card {
    Card {
        title: title.to_string(),
        description: description.to_string(),
        href: href.to_string(),
    }
}

impl Content {
    /// The muu.studio landing page, with the copyright dated `year`.
    pub fn landing(year: i32) -> Self {
        let cards = vec![
            card(
                "Shopify Calculator",
                "Shopify用の損益分岐点を簡単に計算できます。",
                "https://enyukari.capoo.jp/profit-calc/shopify-be/",
            ),
            card(
                "BreakEvenUS Calculator",
                "US向け損益分岐点を簡単に計算できます。",
                "https://enyukari.capoo.jp/profit-calc/be-us/",
            ),
            card(
                "ProfitMarginUS Calculator",
                "利益率やコスト入力により、簡単に売値を出せます。",
                "https://enyukari.capoo.jp/profit-calc/reverse/",
            ),
        ];

        // Menu entries that correspond to a card open that card's page.
        let nav = [
            ("Shopify(BE)", cards[0].href.as_str()),
            ("CalcUS(BE)", cards[1].href.as_str()),
            ("CalcUS", "#contact"),
            ("CalcUS(Reverse)", cards[2].href.as_str()),
            ("Resevation", "#reservation"),
        ]
        .into_iter()
        .map(|(label, href)| NavItem {
            label: label.to_string(),
            target: LinkTarget::parse(href),
        })
        .collect();

        Self {
            brand: BRAND.to_string(),
            headline: vec!["Fully automated".to_string(), "The ultimate machine".to_string()],
            tagline: "Sustainable, cost-efficient and scalable — ready for the future.".to_string(),
            cards_anchor: "product".to_string(),
            cards,
            nav,
            copyright: format!("© {year} {BRAND}"),
        }
    }

    /// Logs the copy once; nothing in the shell rasterises text.
    pub fn log_summary(&self) {
        log::info!("{}: {}", self.brand, self.headline.join(" / "));
        log::debug!("tagline: {}", self.tagline);
        for c in &self.cards {
            log::debug!("card {:?} -> {}", c.title, c.href);
        }
        log::debug!("footer: {}", self.copyright);
    }
}

/// Current calendar year (UTC).
pub fn current_year() -> i32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    year_from_days((secs / 86_400) as i64)
}

/// Gregorian year for a day count since 1970-01-01.
fn year_from_days(days: i64) -> i32 {
    // Days-to-civil on a March-based year (Howard Hinnant).
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    year as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_anchors_from_urls() {
        assert_eq!(LinkTarget::parse("#contact"), LinkTarget::Anchor("contact".into()));
        assert_eq!(
            LinkTarget::parse("https://example.com/"),
            LinkTarget::External("https://example.com/".into())
        );
        assert_eq!(LinkTarget::parse("#reservation").to_string(), "#reservation");
    }

    #[test]
    fn landing_has_three_cards_and_five_entries() {
        let c = Content::landing(2026);
        assert_eq!(c.cards.len(), 3);
        assert_eq!(c.nav.len(), 5);
        assert_eq!(c.copyright, "© 2026 muu.studio");
    }

    #[test]
    fn card_entries_carry_card_urls() {
        let c = Content::landing(2026);
        let external: Vec<_> = c
            .nav
            .iter()
            .filter_map(|n| match &n.target {
                LinkTarget::External(u) => Some(u.as_str()),
                LinkTarget::Anchor(_) => None,
            })
            .collect();
        let hrefs: Vec<_> = c.cards.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(external, hrefs);
        assert_eq!(c.nav[2].target, LinkTarget::Anchor("contact".into()));
    }

    #[test]
    fn year_from_days_handles_boundaries() {
        assert_eq!(year_from_days(0), 1970);
        assert_eq!(year_from_days(364), 1970);
        assert_eq!(year_from_days(365), 1971);
        // 2024-02-29 and 2024-12-31.
        assert_eq!(year_from_days(19_782), 2024);
        assert_eq!(year_from_days(20_088), 2024);
        assert_eq!(year_from_days(20_089), 2025);
    }
}
