// crates/showcase-app/src/fragments.rs
// Shared header/contact/footer injection via fetch

use serde::{Deserialize, Serialize};

/// A placeholder element and the HTML fragment that replaces it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FragmentSource {
    pub placeholder_id: String,
    pub url: String,
}

impl FragmentSource {
    pub fn new(placeholder_id: &str, url: &str) -> Self {
        Self {
            placeholder_id: placeholder_id.to_string(),
            url: url.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.placeholder_id.trim().is_empty() && !self.url.trim().is_empty()
    }
}

pub fn default_fragments() -> Vec<FragmentSource> {
    vec![
        FragmentSource::new("header-placeholder", "header.html"),
        FragmentSource::new("contact-placeholder", "contact.html"),
        FragmentSource::new("footer-placeholder", "footer.html"),
    ]
}

#[cfg(target_arch = "wasm32")]
pub use browser::{load_all, load_fragment};

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen_futures::spawn_local;

    use super::FragmentSource;
    use crate::dom;
    use crate::error::{Result, WidgetError};

    /// Fetch one fragment and swap it in for its placeholder.
    /// On any error the placeholder is left as it was.
    pub async fn load_fragment(source: &FragmentSource) -> Result<()> {
        let document = dom::document()?;
        let placeholder = document
            .get_element_by_id(&source.placeholder_id)
            .ok_or_else(|| WidgetError::MissingElement(format!("#{}", source.placeholder_id)))?;

        let resp = gloo_net::http::Request::get(&source.url)
            .send()
            .await
            .map_err(|e| WidgetError::Fetch(format!("{}: {}", source.url, e)))?;

        if !resp.ok() {
            return Err(WidgetError::Fetch(format!(
                "{} returned HTTP {}",
                source.url,
                resp.status()
            )));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| WidgetError::Fetch(format!("{}: {}", source.url, e)))?;

        placeholder.set_outer_html(&html);
        Ok(())
    }

    /// Start every load independently; one failure never blocks the others
    pub fn load_all(sources: &[FragmentSource]) {
        for source in sources.iter().filter(|s| s.is_valid()).cloned() {
            spawn_local(async move {
                match load_fragment(&source).await {
                    Ok(()) => log::debug!("Loaded fragment {} from {}", source.placeholder_id, source.url),
                    Err(e) => log::error!("Failed to load fragment {}: {}", source.placeholder_id, e),
                }
            });
        }
    }
}
