//! Embeddable slider fragment, the analog of the CMS shortcode: renders the
//! enabled slides as self-contained markup whose initial active state comes
//! from a carousel instance owned by this call alone.

use carousel::{Carousel, VisualFrame};
use serde::Deserialize;
use shared::protocol::SlideRecord;

fn default_speed_ms() -> u32 {
    5_000
}

fn default_limit() -> usize {
    5
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedOptions {
    #[serde(default = "default_true")]
    pub autoplay: bool,
    #[serde(default = "default_speed_ms")]
    pub speed: u32,
    #[serde(default = "default_true")]
    pub arrows: bool,
    #[serde(default = "default_true")]
    pub dots: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            speed: default_speed_ms(),
            arrows: true,
            dots: true,
            limit: default_limit(),
        }
    }
}

pub fn render_slider_fragment(slides: &[SlideRecord], options: &EmbedOptions) -> String {
    let slides: Vec<&SlideRecord> = slides.iter().take(options.limit).collect();
    if slides.is_empty() {
        return "<p class=\"slider-empty\">No slides found.</p>".to_string();
    }

    // A fresh controller per render: the fragment shares no state with the
    // site's own sliders or with any other embed.
    let mut controller = Carousel::fixed(slides.len());
    let active_index = match controller.go_to(0) {
        Some(VisualFrame::Activate { index, .. }) => index,
        _ => 0,
    };

    let instance_id = format!("pondlike-slider-{}", uuid::Uuid::new_v4().simple());
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"pondlike-slider\" id=\"{instance_id}\" data-autoplay=\"{}\" data-speed=\"{}\">\n",
        options.autoplay, options.speed
    ));
    html.push_str("  <div class=\"slider-container\">\n");
    for (index, slide) in slides.iter().enumerate() {
        let active = if index == active_index { " active" } else { "" };
        let style = slide
            .image
            .as_deref()
            .map(|image| format!(" style=\"background-image: url('{}')\"", escape_html(image)))
            .unwrap_or_default();
        html.push_str(&format!("    <div class=\"slide{active}\"{style}>\n"));
        html.push_str(&format!(
            "      <h2 class=\"slide-title\">{}</h2>\n",
            escape_html(&slide.title)
        ));
        html.push_str(&format!(
            "      <p class=\"slide-description\">{}</p>\n",
            escape_html(&slide.description)
        ));
        html.push_str("    </div>\n");
    }
    html.push_str("  </div>\n");

    if options.arrows {
        html.push_str(
            "  <button class=\"slider-nav prev\" aria-label=\"Previous slide\">&lsaquo;</button>\n",
        );
        html.push_str(
            "  <button class=\"slider-nav next\" aria-label=\"Next slide\">&rsaquo;</button>\n",
        );
    }

    if options.dots {
        html.push_str("  <div class=\"slider-dots\">\n");
        for index in 0..slides.len() {
            let active = if index == active_index { " active" } else { "" };
            html.push_str(&format!(
                "    <button class=\"dot{active}\" data-slide=\"{index}\" aria-label=\"Go to slide {}\"></button>\n",
                index + 1
            ));
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
