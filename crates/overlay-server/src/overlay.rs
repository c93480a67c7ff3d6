//! Overlay page rendering.
//!
//! The page is a transparent, centered text block that polls the JSON
//! endpoint and pulses when the watched count moves in the interesting
//! direction: copies left going down, or sales going up.

use std::time::Duration;

use overlay_core::AssetId;

use crate::config::SourceKind;

/// Font size in pixels when `size` is absent or invalid.
pub const DEFAULT_FONT_SIZE: u32 = 48;

/// Largest accepted font size in pixels.
pub const MAX_FONT_SIZE: u32 = 1000;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <style>
    body {
      background: transparent;
      color: white;
      font-size: __FONT_SIZE__px;
      font-family: Arial, sans-serif;
      text-align: center;
      white-space: pre-line;
    }
    .flash { animation: flash 0.6s ease; }
    @keyframes flash {
      0% { transform: scale(1); }
      40% { transform: scale(1.1); }
      100% { transform: scale(1); }
    }
  </style>
</head>
<body>
  <div id="ugc">Loading…</div>
  <script>
    const ASSET_ID = __ASSET_ID__;
    const POLL_MS = __POLL_MS__;
    let prev = null;

    function describe(data) {
      __DESCRIBE__
    }

    function shouldPulse(prev, current) {
      __PULSE__
    }

    async function update() {
      const el = document.getElementById("ugc");
      try {
        const res = await fetch("/ugc?assetId=" + encodeURIComponent(ASSET_ID) + "&_=" + Date.now());
        const data = await res.json();

        if (data.error) {
          el.innerText = "Error: " + data.error;
          return;
        }
        el.innerText = describe(data);

        const current = data.__FIELD__;
        if (typeof prev === "number" && typeof current === "number" && shouldPulse(prev, current)) {
          el.classList.remove("flash");
          void el.offsetWidth;
          el.classList.add("flash");
        }
        prev = current;
      } catch (e) {
        el.innerText = "Fetch error";
      }
    }

    update();
    setInterval(update, POLL_MS);
  </script>
</body>
</html>
"#;

/// Everything needed to render one overlay page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayPage {
    /// Asset the page polls.
    pub asset_id: AssetId,
    /// Font size in pixels.
    pub font_size: u32,
    /// Upstream variant, deciding what is shown and when to pulse.
    pub source: SourceKind,
    /// Delay between polls.
    pub poll_interval: Duration,
}

impl OverlayPage {
    /// Renders the page as HTML.
    #[must_use]
    pub fn render(&self) -> String {
        let (field, describe, pulse) = match self.source {
            SourceKind::Catalog => (
                "copies_left",
                r#"return data.name + "\nCopies Left: " + data.copies_left + "/" + data.total_copies;"#,
                "return current < prev;",
            ),
            SourceKind::Economy => (
                "sales",
                r#"return data.name + "\nSales: " + data.sales;"#,
                "return current > prev;",
            ),
        };

        TEMPLATE
            .replace("__FONT_SIZE__", &self.font_size.to_string())
            .replace("__ASSET_ID__", &js_string(self.asset_id.as_str()))
            .replace("__POLL_MS__", &self.poll_interval.as_millis().to_string())
            .replace("__DESCRIBE__", describe)
            .replace("__PULSE__", pulse)
            .replace("__FIELD__", field)
    }
}

/// Parses the `size` query value, falling back to [`DEFAULT_FONT_SIZE`].
#[must_use]
pub fn font_size(requested: Option<&str>) -> u32 {
    requested
        .and_then(|size| size.trim().parse::<u32>().ok())
        .filter(|size| (1..=MAX_FONT_SIZE).contains(size))
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Quotes `value` as a JavaScript string literal safe inside `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}
