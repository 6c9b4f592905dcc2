//! Hands external link targets to the OS.

use std::io;

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> io::Result<()>;
}

/// Opens URLs in the user's default browser.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> io::Result<()> {
        open::that_detached(url)
    }
}

/// Records URLs without opening anything.
#[derive(Debug, Default)]
pub struct LogOpener {
    pub opened: Vec<String>,
}

impl LinkOpener for LogOpener {
    fn open(&mut self, url: &str) -> io::Result<()> {
        log::info!("link (not opened): {url}");
        self.opened.push(url.to_string());
        Ok(())
    }
}

/// Opens `url`, logging the outcome. Failures are not fatal to the page.
pub fn follow(opener: &mut dyn LinkOpener, url: &str) {
    match opener.open(url) {
        Ok(()) => log::info!("opened {url}"),
        Err(e) => log::error!("failed to open {url}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl LinkOpener for Failing {
        fn open(&mut self, _url: &str) -> io::Result<()> {
            Err(io::Error::other("no browser"))
        }
    }

    #[test]
    fn log_opener_records_urls() {
        let mut o = LogOpener::default();
        follow(&mut o, "https://example.com/");
        assert_eq!(o.opened, vec!["https://example.com/".to_string()]);
    }

    #[test]
    fn failures_are_swallowed() {
        follow(&mut Failing, "https://example.com/");
    }
}
