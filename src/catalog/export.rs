//! HTML card export of rendered products.
//!
//! Produces a self-contained fragment of product cards (image, name, link)
//! suitable for pasting into an email or web page body, or placed into a
//! full page template at [`PRODUCTS_MARKER`].

use super::{escape_markup, DisplayUnit};

/// Render `units` as a fragment of HTML product cards.
///
/// Every interpolated value is escaped; the name uses the unit's pre-escaped
/// `alt_text`.
pub fn html_fragment(units: &[DisplayUnit]) -> String {
    let mut out = String::with_capacity(units.len() * 512);
    out.push_str("<div class=\"catalog\">\n");
    for unit in units {
        let link = escape_markup(&unit.link);
        let image = escape_markup(&unit.image_url);
        let subtitle = escape_markup(&unit.subtitle);
        out.push_str(&format!(
            concat!(
                "  <div class=\"product-card\">\n",
                "    <a target=\"_blank\" href=\"{link}\" title=\"{name}\">",
                "<img alt=\"{name}\" src=\"{image}\" style=\"max-width: 120px;\" /></a>\n",
                "    <p class=\"product-name\">{name}</p>\n",
                "    <p class=\"product-codes\">{subtitle}</p>\n",
                "    <a target=\"_blank\" class=\"product-link\" href=\"{link}\">Ver Produto</a>\n",
                "  </div>\n",
            ),
            link = link,
            name = unit.alt_text,
            image = image,
            subtitle = subtitle,
        ));
    }
    out.push_str("</div>\n");
    out
}

/// Placeholder in an export template that receives the card fragment.
pub const PRODUCTS_MARKER: &str = "<!-- PRODUTOS_AQUI -->";

/// Place `fragment` into `template` at every [`PRODUCTS_MARKER`].
///
/// A template without the marker gets the fragment appended, so an export
/// never silently drops the products.
pub fn fill_template(template: &str, fragment: &str) -> String {
    if template.contains(PRODUCTS_MARKER) {
        return template.replace(PRODUCTS_MARKER, fragment);
    }
    tracing::warn!(marker = PRODUCTS_MARKER, "Export template has no products marker, appending");
    let mut out = String::with_capacity(template.len() + fragment.len());
    out.push_str(template);
    out.push_str(fragment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalize, ProductRecord};

    fn unit(name: &str, url: &str) -> DisplayUnit {
        DisplayUnit::from(&normalize(&ProductRecord {
            sku: Some("1".into()),
            name: Some(name.into()),
            product_url: Some(url.into()),
            ..Default::default()
        }))
    }

    #[test]
    fn test_empty_export_is_wrapper_only() {
        assert_eq!(html_fragment(&[]), "<div class=\"catalog\">\n</div>\n");
    }

    #[test]
    fn test_export_escapes_name_in_attributes() {
        let html = html_fragment(&[unit("Copo 12\" D'Ouro", "https://shop.example.com/1")]);
        assert!(html.contains("alt=\"Copo 12&quot; D&#39;Ouro\""));
        assert!(html.contains("<p class=\"product-name\">Copo 12&quot; D&#39;Ouro</p>"));
        assert!(!html.contains("12\" D'"));
    }

    #[test]
    fn test_export_escapes_links() {
        let html = html_fragment(&[unit("x", "https://shop.example.com/?a=1&b=\"2\"")]);
        assert!(html.contains("href=\"https://shop.example.com/?a=1&amp;b=&quot;2&quot;\""));
    }

    #[test]
    fn test_export_keeps_unit_order() {
        let html = html_fragment(&[unit("first", "#"), unit("second", "#")]);
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("product-card").count(), 2);
    }

    #[test]
    fn test_template_marker_replaced() {
        let template = "<html><body><h1>Ofertas</h1><!-- PRODUTOS_AQUI --></body></html>";
        let page = fill_template(template, "<div class=\"catalog\"></div>");
        assert_eq!(
            page,
            "<html><body><h1>Ofertas</h1><div class=\"catalog\"></div></body></html>"
        );
    }

    #[test]
    fn test_template_without_marker_appends() {
        let page = fill_template("<p>header</p>", "<div>cards</div>");
        assert_eq!(page, "<p>header</p><div>cards</div>");
    }
}
