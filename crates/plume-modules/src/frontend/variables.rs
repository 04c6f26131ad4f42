//! System variables declared by the frontend module.

use plume_install::CatalogEntry;

const FOOTER_TOP: &str = r#"<img class="size" src="/images/icons/icon.png" alt="Logo of Plume" title="Plume">
<p>This site is powered by Plume &copy; {year}</p>"#;

pub fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("frontend.site.noindex", "Site noindex")
            .with_note("Disable site indexing by search engines"),
        CatalogEntry::new("frontend.site.logo", "Site logo").with_note("Logo of the website"),
        CatalogEntry::new("frontend.site.title", "Site title")
            .with_value("Plume")
            .with_note("Title of the website"),
        CatalogEntry::new("frontend.site.excerpt", "Site excerpt")
            .with_value("Plume is an open-source modular CMS written in Rust.")
            .with_note("Excerpt for the website"),
        CatalogEntry::new("frontend.site.filters", "Default content filters")
            .with_note("Comma separated list of default content filters"),
        CatalogEntry::new("frontend.site.css", "Site CSS")
            .with_note("Global CSS injection for the site"),
        CatalogEntry::new("frontend.site.js", "Site JS")
            .with_note("Global JavaScript injection for the site"),
        CatalogEntry::new("frontend.site.footer.top", "Site footer")
            .with_value(FOOTER_TOP)
            .with_note("Top footer content placed above the footer menu"),
        CatalogEntry::new("frontend.site.footer.bottom", "Site footer bottom")
            .with_note("Bottom footer content placed under the footer menu"),
        CatalogEntry::new("frontend.home.page.title", "Home page title")
            .with_value("Welcome")
            .with_note("Title of the home page"),
        CatalogEntry::new("frontend.home.page.excerpt", "Home page excerpt")
            .with_value("This is your brand new Plume powered website")
            .with_note("Excerpt for the home page"),
        CatalogEntry::new("frontend.home.page.icon", "Home page icon")
            .with_value("🪶")
            .with_note("Icon of the home page"),
        CatalogEntry::new("frontend.home.page.link.label", "Home page link label")
            .with_value("Start customizing →")
            .with_note("Link label of the home page"),
        CatalogEntry::new("frontend.home.page.link.url", "Home page link url")
            .with_value("/admin/")
            .with_note("Link URL of the home page"),
        CatalogEntry::new("frontend.page.not.found.icon", "Page not found icon")
            .with_value("🔍")
            .with_note("Icon for the not found page"),
        CatalogEntry::new("frontend.page.not.found.title", "Page not found title")
            .with_value("Page not found")
            .with_note("Title of the not found page"),
        CatalogEntry::new("frontend.page.not.found.excerpt", "Page not found excerpt")
            .with_value("Unfortunately the requested page is not available.")
            .with_note("Excerpt for the not found page"),
        CatalogEntry::new("frontend.page.not.found.link", "Page not found link")
            .with_value("Go to the home page →")
            .with_note("Retry link text for the not found page"),
    ]
}
