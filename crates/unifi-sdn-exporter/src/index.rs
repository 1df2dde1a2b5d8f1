//! HTML landing page listing every site of every configured controller.

use url::form_urlencoded;

use unifi_sdn_core::Site;

/// Sites of one controller, as shown on the index page.
pub struct ControllerSites {
    pub target: String,
    pub sites: Vec<Site>,
}

/// Render the index page. Sites are sorted by display name.
pub fn render(controllers: Vec<ControllerSites>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>UniFi SDN Exporter</title>\n</head>\n<body>\n<h1>UniFi SDN Exporter</h1>\n",
    );

    for ControllerSites { target, mut sites } in controllers {
        sites.sort_by(|a, b| a.desc.cmp(&b.desc));

        html.push_str(&format!("<h2>{}</h2>\n<ul>\n", escape(&target)));
        for site in &sites {
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a> <code>{}</code></li>\n",
                escape(&metrics_href(&target, &site.name)),
                escape(&site.desc),
                escape(&site.name),
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn metrics_href(target: &str, site: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("target", target)
        .append_pair("site", site)
        .finish();
    format!("/metrics?{query}")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
