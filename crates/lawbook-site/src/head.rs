//! Tags injected into every page head.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use lawbook_config::{AnalyticsConfig, HeadTag, SiteOptions};

/// Tags without closing counterpart.
const VOID_TAGS: [&str; 3] = ["link", "meta", "base"];

/// Head tags of the site: favicon, configured extras, then the analytics loader.
#[must_use]
pub fn head_tags(site: &SiteOptions, analytics: Option<&AnalyticsConfig>) -> Vec<HeadTag> {
    let mut tags = Vec::with_capacity(site.head.len() + 2);

    if let Some(favicon) = site.favicon() {
        tags.push(HeadTag {
            tag: "link".to_owned(),
            attrs: BTreeMap::from([
                ("rel".to_owned(), "icon".to_owned()),
                ("href".to_owned(), favicon.to_owned()),
            ]),
            content: None,
        });
    }

    tags.extend(site.head.iter().cloned());

    if let Some(analytics) = analytics {
        tags.push(HeadTag {
            tag: "script".to_owned(),
            attrs: BTreeMap::new(),
            content: Some(baidu_loader(&analytics.baidu_id)),
        });
    }

    tags
}

/// Inline script loading the Baidu Tongji tracker for `site_id`.
fn baidu_loader(site_id: &str) -> String {
    format!(
        "var _hmt = _hmt || [];\n\
         (function () {{\n  \
           var hm = document.createElement('script');\n  \
           hm.src = 'https://hm.baidu.com/hm.js?{site_id}';\n  \
           var s = document.getElementsByTagName('script')[0];\n  \
           s.parentNode.insertBefore(hm, s);\n\
         }})();"
    )
}

/// Client module pushing a page view to the tracker on every route change.
const TRACK_ROUTE_CHANGES: &str = "\
import { defineClientConfig } from \"@vuepress/client\";

export default defineClientConfig({
  enhance({ router }) {
    router.afterEach((to) => {
      if (typeof _hmt !== \"undefined\" && to.path) {
        _hmt.push([\"_trackPageview\", to.fullPath]);
      }
    });
  },
});
";

/// Client module reporting page views on client-side navigation.
///
/// The loader only records the first page load of the single-page app.
#[must_use]
pub fn client_script(analytics: Option<&AnalyticsConfig>) -> Option<String> {
    analytics.map(|_| TRACK_ROUTE_CHANGES.to_owned())
}

/// Render head tags as HTML, one tag per line.
///
/// Attribute values are escaped; inline content is trusted manifest text and
/// written as-is.
#[must_use]
pub fn render_head(tags: &[HeadTag]) -> String {
    let mut html = String::new();
    for tag in tags {
        html.push('<');
        html.push_str(&tag.tag);
        for (name, value) in &tag.attrs {
            let _ = write!(html, " {name}=\"{}\"", escape_attr(value));
        }
        html.push('>');

        if !VOID_TAGS.contains(&tag.tag.as_str()) {
            if let Some(content) = &tag.content {
                html.push_str(content);
            }
            let _ = write!(html, "</{}>", tag.tag);
        }
        html.push('\n');
    }
    html
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
