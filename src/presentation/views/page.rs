// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::match_mode::MatchMode;
use crate::domain::services::image_load::{
    ImageCells, ImageKey, ImagePresentation, IMAGE_UNAVAILABLE,
};
use crate::domain::services::result_view::{
    EmptyView, ImageView, PageBody, PageModel, RenderModel, ResultsView, SiteView, Suggestion,
};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6fa; color: #222; }
header { background: #2d3561; color: #fff; padding: 1rem 2rem; }
main { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
.search-bar { display: flex; gap: .5rem; }
.search-bar input { flex: 1; padding: .6rem; font-size: 1rem; }
.search-mode { margin: 1rem 0; display: flex; gap: .5rem; align-items: center; }
.mode-btn.active { background: #2d3561; color: #fff; }
.error-message { background: #fdecea; border: 1px solid #f5c2c0; padding: .8rem; border-radius: 6px; }
.tag, .suggestion-btn { display: inline-block; margin: .2rem; padding: .3rem .7rem; border-radius: 1rem; background: #e3e6f3; color: #2d3561; text-decoration: none; }
.site-section { background: #fff; border-radius: 8px; padding: 1rem; margin: 1rem 0; }
.site-header { display: flex; gap: .6rem; align-items: center; flex-wrap: wrap; }
.badge { font-size: .75rem; padding: .1rem .5rem; border-radius: .5rem; background: #ddd; }
.images-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: .8rem; margin-top: .8rem; }
.image-wrapper { height: 140px; display: flex; align-items: center; justify-content: center; background: #eee; overflow: hidden; }
.image-wrapper img { max-width: 100%; max-height: 100%; }
.image-error { text-align: center; color: #999; }
.skeleton { height: 140px; background: linear-gradient(90deg, #eee, #f8f8f8, #eee); border-radius: 6px; }
.loader { width: 24px; height: 24px; border: 3px solid #ccc; border-top-color: #2d3561; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

const SCRIPT: &str = r#"
function reportImage(el, generation, site, image, outcome) {
  fetch(`/images/${generation}/${site}/${image}/${outcome}`, { method: 'POST' }).catch(() => {});
  const wrapper = el.parentElement;
  const placeholder = wrapper.querySelector('.image-placeholder');
  if (placeholder) placeholder.remove();
  if (outcome === 'loaded') {
    el.style.display = 'block';
  } else {
    const box = document.createElement('div');
    box.className = 'image-error';
    box.innerHTML = '<span>❌</span><p>Image unavailable</p>';
    wrapper.replaceChildren(box);
  }
}
"#;

/// 订阅页面渲染之后的状态变化
///
/// 带上已渲染的代次和加载标记，连接建立前发生的变化也能收到。
fn live_updates(generation: u64, loading: bool) -> String {
    format!(
        "new EventSource('/events?since={}&loading={}')\n  .addEventListener('state', () => window.location.reload());",
        generation, loading
    )
}

fn search_link(query: &str) -> String {
    format!("/search?q={}", urlencoding::encode(query))
}

fn suggestion_links(suggestions: &[Suggestion], class: &str) -> String {
    suggestions
        .iter()
        .map(|s| {
            format!(
                r#"<a class="{}" href="{}">{}</a>"#,
                class,
                attr(&search_link(&s.query)),
                text(&s.query)
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

fn search_bar(query: &str, loading: bool) -> String {
    let disabled = if loading { " disabled" } else { "" };
    let label = if loading { "Searching..." } else { "Search" };
    format!(
        r#"<form class="search-bar" action="/search" method="get">
<input type="text" name="q" value="{}" placeholder="Search images (e.g. chat, Ferrari...)"{}>
<button type="submit"{}>{}</button>
</form>
<p class="search-hint">Tip: use several keywords for more precise results</p>"#,
        attr(query),
        disabled,
        disabled,
        label
    )
}

fn mode_switch(current: MatchMode, loading: bool) -> String {
    let disabled = if loading { " disabled" } else { "" };
    let buttons = [MatchMode::Any, MatchMode::All]
        .iter()
        .map(|&mode| {
            let active = if mode == current { " active" } else { "" };
            format!(
                r#"<button class="mode-btn{}" name="mode" value="{}"{}>{}</button>"#,
                active,
                mode.wire_value(),
                disabled,
                text(mode.label())
            )
        })
        .collect::<Vec<_>>()
        .join("");
    format!(
        r#"<form class="search-mode" action="/mode" method="post"><span>Multi-word search mode:</span>{}</form>"#,
        buttons
    )
}

fn welcome(suggestions: &[Suggestion]) -> String {
    format!(
        r#"<div class="welcome">
<h2>Welcome to the image search engine</h2>
<p>Enter one or more keywords to search for images</p>
<div class="suggestions"><p>Suggestions:</p>{}</div>
</div>"#,
        suggestion_links(suggestions, "tag")
    )
}

/// 加载占位，纯装饰
fn skeleton() -> String {
    let cards = (0..6)
        .map(|_| r#"<div class="skeleton"></div>"#)
        .collect::<Vec<_>>()
        .join("");
    format!(r#"<div class="images-grid loading">{}</div>"#, cards)
}

fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="error-message"><span class="error-icon">⚠️</span> {}</div>"#,
        text(message)
    )
}

fn empty_results(view: &EmptyView) -> String {
    let mut html = format!(
        r#"<div class="no-results"><h3>No results found</h3><p>No images found for "{}"</p>"#,
        text(&view.query)
    );
    if !view.suggestions.is_empty() {
        html.push_str(&format!(
            r#"<div class="suggestions-section"><p class="suggestions-label">Did you mean:</p><div class="suggestions-list">{}</div></div>"#,
            suggestion_links(&view.suggestions, "suggestion-btn")
        ));
    }
    if let Some(hint) = view.hint {
        html.push_str(&format!(r#"<p class="hint">{}</p>"#, text(hint)));
    }
    html.push_str("</div>");
    html
}

fn image_card(
    generation: u64,
    key: ImageKey,
    image: &ImageView,
    cells: &ImageCells,
) -> String {
    let visual = match cells.presentation(key) {
        ImagePresentation::Placeholder => format!(
            r#"<div class="image-placeholder"><div class="loader"></div></div><img src="{src}" alt="{alt}" style="display:none" onload="reportImage(this, {g}, {s}, {i}, 'loaded')" onerror="reportImage(this, {g}, {s}, {i}, 'failed')">"#,
            src = attr(&image.src),
            alt = attr(&image.alt),
            g = generation,
            s = key.site,
            i = key.image
        ),
        ImagePresentation::Image => format!(
            r#"<img src="{}" alt="{}">"#,
            attr(&image.src),
            attr(&image.alt)
        ),
        ImagePresentation::Unavailable => format!(
            r#"<div class="image-error"><span>❌</span><p>{}</p></div>"#,
            IMAGE_UNAVAILABLE
        ),
    };
    format!(
        r#"<div class="image-card"><div class="image-wrapper">{}</div><div class="image-info"><p class="image-alt" title="{}">{}</p><a href="{}" target="_blank" rel="noopener noreferrer" class="site-url-link">{}</a></div></div>"#,
        visual,
        attr(&image.alt),
        text(&image.caption),
        attr(&image.site_url),
        text(&image.site_url)
    )
}

fn site_section(generation: u64, index: usize, site: &SiteView, cells: &ImageCells) -> String {
    let badges = site
        .badges
        .iter()
        .map(|b| {
            format!(
                r#"<span class="badge badge-{}">{}</span>"#,
                b.label.to_ascii_lowercase(),
                b.label
            )
        })
        .collect::<Vec<_>>()
        .join("");
    let matched = site
        .matched_summary
        .as_deref()
        .map(|m| format!(r#"<span class="matched-words">{}</span>"#, text(m)))
        .unwrap_or_default();
    let images = site
        .images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            image_card(
                generation,
                ImageKey {
                    site: index,
                    image: i,
                },
                image,
                cells,
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<section class="site-section" data-site-id="{}"><div class="site-header"><span class="site-emoji">{}</span><h3>{}</h3><div class="method-badges">{}</div>{}<span class="image-count">{}</span></div><div class="images-grid">{}</div></section>"#,
        site.site_id,
        text(&site.emoji),
        text(&site.name),
        badges,
        matched,
        text(&site.image_count_label),
        images
    )
}

fn results(generation: u64, view: &ResultsView, cells: &ImageCells) -> String {
    let query_words = if view.query_words.is_empty() {
        String::new()
    } else {
        let words = view
            .query_words
            .iter()
            .map(|w| format!(r#"<span class="query-word">{}</span>"#, text(w)))
            .collect::<Vec<_>>()
            .join("");
        format!(r#"<div class="query-words"><span>Searched words:</span>{}</div>"#, words)
    };
    let sites = view
        .sites
        .iter()
        .enumerate()
        .map(|(i, site)| site_section(generation, i, site, cells))
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<div class="results"><div class="results-header"><h2>Results for "{}"</h2><div class="results-stats"><span class="stat">{}</span><span class="stat">{}</span><span class="stat mode-indicator">Mode: <strong>{}</strong></span></div>{}</div>{}</div>"#,
        text(&view.query),
        text(&view.sites_label),
        text(&view.images_label),
        view.mode_label,
        query_words,
        sites
    )
}

/// 渲染整页 HTML
pub fn render_page(page: &PageModel, cells: &ImageCells) -> String {
    let query = match &page.body {
        PageBody::Loading { query } | PageBody::Failed { query, .. } => query.as_str(),
        PageBody::Loaded { view } => match view {
            RenderModel::Empty(v) => v.query.as_str(),
            RenderModel::Results(v) => v.query.as_str(),
        },
        PageBody::Welcome { .. } => "",
    };

    let content = match &page.body {
        PageBody::Welcome { suggestions } => welcome(suggestions),
        PageBody::Loading { .. } => skeleton(),
        PageBody::Failed { message, .. } => error_banner(message),
        PageBody::Loaded {
            view: RenderModel::Empty(view),
        } => empty_results(view),
        PageBody::Loaded {
            view: RenderModel::Results(view),
        } => results(page.generation, view, cells),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Image Search</title><style>{}</style>
<script>{}
{}</script>
</head>
<body>
<header><h1>Image Search Engine</h1></header>
<main class="main-content">
{}
{}
{}
</main>
</body>
</html>"#,
        STYLE,
        SCRIPT,
        live_updates(page.generation, page.loading),
        search_bar(query.trim(), page.loading),
        mode_switch(page.mode, page.loading),
        content
    )
}
