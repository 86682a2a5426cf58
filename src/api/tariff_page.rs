use scraper::{Html, Selector};
use ureq::Agent;
use url::Url;

use crate::{
    core::source::{ListingEntry, ListingSource},
    prelude::*,
};

/// Utility tariff page listing the rate workbooks with their effective date ranges.
pub struct TariffPage {
    agent: Agent,
    url: Url,
    selector: String,
}

impl TariffPage {
    pub fn new(agent: Agent, url: Url, selector: impl Into<String>) -> Self {
        Self { agent, url, selector: selector.into() }
    }
}

impl ListingSource for TariffPage {
    #[instrument(skip_all, fields(url = %self.url))]
    fn entries(&self) -> Result<Vec<ListingEntry>, RateError> {
        info!("fetching the listing…");
        let transport_error = |source| RateError::Transport { locator: self.url.to_string(), source };
        let html = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(transport_error)?
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;
        let entries = parse_listing(&html, &self.url, &self.selector)?;
        info!(n_entries = entries.len(), "fetched the listing");
        Ok(entries)
    }
}

/// Anchors matching the selector whose `href` points to a workbook, labelled by their text.
fn parse_listing(html: &str, base: &Url, selector: &str) -> Result<Vec<ListingEntry>, RateError> {
    let selector = Selector::parse(selector)
        .map_err(|error| RateError::malformed(format!("invalid selector `{selector}`: {error}")))?;
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_workbook(href) {
            trace!(href, "skipping");
            continue;
        }
        let url = base.join(href.trim()).map_err(|error| {
            RateError::malformed(format!("invalid link `{href}` on {base}: {error}"))
        })?;
        let label = anchor.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
        trace!(%label, %url, "found");
        entries.push(ListingEntry::new(label, url.to_string()));
    }

    if entries.is_empty() {
        return Err(RateError::malformed(format!("no rate workbooks listed on {base}")));
    }
    Ok(entries)
}

fn is_workbook(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.to_ascii_lowercase().ends_with(".xlsx")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{api::new_agent, core::index::DocumentIndex};

    const PAGE: &str = r#"
        <html><body>
          <ul><li><a href="/en/contact.html">Contact us</a></li></ul>
          <ul>
            <li><a href="assets/xls/ELEC_2023-10-01.xlsx">Residential rates
                (Oct 1, 2023 &ndash; Present)</a></li>
            <li><a href="assets/xls/ELEC_2023-01-01.XLSX">Residential rates (Jan 1, 2023 - Sep 30, 2023)</a></li>
            <li><a href="assets/pdf/ELEC_2023-01-01.pdf">Residential rates (Jan 1, 2023 - Sep 30, 2023)</a></li>
            <li><a href="https://cdn.example.com/ELEC_2022.xlsx?download=1">Residential rates (Jan 1, 2022 - Dec 31, 2022)</a></li>
          </ul>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://www.pge.com/tariffs/electric.shtml").unwrap()
    }

    #[test]
    fn test_parse_listing() -> Result {
        let entries = parse_listing(PAGE, &base(), "li a[href]")?;
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].label, "Residential rates (Oct 1, 2023 – Present)");
        assert_eq!(entries[0].locator.as_str(), "https://www.pge.com/tariffs/assets/xls/ELEC_2023-10-01.xlsx");
        assert_eq!(entries[1].locator.as_str(), "https://www.pge.com/tariffs/assets/xls/ELEC_2023-01-01.XLSX");
        assert_eq!(entries[2].locator.as_str(), "https://cdn.example.com/ELEC_2022.xlsx?download=1");

        let index = DocumentIndex::build(entries)?;
        assert_eq!(index.len(), 3);
        Ok(())
    }

    #[test]
    fn test_no_workbooks() {
        let html = r#"<ul><li><a href="/rates.pdf">Rates (Jan 1, 2023 - Present)</a></li></ul>"#;
        let error = parse_listing(html, &base(), "li a[href]").unwrap_err();
        assert!(matches!(error, RateError::MalformedDocument(_)));
    }

    #[test]
    fn test_invalid_selector() {
        let error = parse_listing(PAGE, &base(), "li a[").unwrap_err();
        assert!(matches!(error, RateError::MalformedDocument(reason) if reason.contains("selector")));
    }

    #[test]
    #[ignore = "makes the HTTP request"]
    fn test_entries_ok() -> Result {
        let page = TariffPage::new(
            new_agent(Duration::from_secs(30)),
            Url::parse("https://www.pge.com/tariffs/electric.shtml")?,
            "li a[href]",
        );
        let entries = page.entries()?;
        assert!(!entries.is_empty());
        DocumentIndex::build(entries)?;
        Ok(())
    }
}
