//! Content installation: the default pages and menus of a fresh site.
//!
//! Building the plan and writing it are separate steps. [`ContentInstaller::plan`]
//! gathers contributions through hooks and adds the fixed entries;
//! [`ContentInstaller::persist`] writes the plan as three write-groups that
//! run concurrently with each other and sequentially inside:
//!
//! 1. `home-page`: create the home page, then publish it as the site root.
//! 2. `pages`: create every other page, then publish each one's metadata.
//! 3. `menus`: create both menus, then every menu item.
//!
//! All three groups always run to completion; a failure in any of them
//! fails the installation once the others have finished.

use std::fmt;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;
use plume_core::types::MenuId;
use plume_database::Persistence;
use plume_entity::menu::{DEFAULT_PRIORITY, Menu, MenuItem};
use plume_entity::page::{Page, PageMetadata};
use plume_hooks::{FieldKind, FieldRules, HookContext, HookDispatcher, Shape, names};

/// Key of the main navigation menu.
pub const MAIN_MENU_KEY: &str = "main";
/// Key of the footer menu.
pub const FOOTER_MENU_KEY: &str = "footer";
/// Placeholder body of the home page, replaced at render time by whichever
/// module answers the `frontend-home-page` hook.
pub const HOME_PAGE_CONTENT: &str = "[frontend-home-page]";

/// A contributed menu item, before it is bound to a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    pub label: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub target_blank: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

impl MenuItemInput {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            icon: None,
            target_blank: false,
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Binds the item to `menu_id`.
    pub fn into_item(self, menu_id: MenuId) -> MenuItem {
        MenuItem::new(menu_id, self.label, self.url)
            .with_icon(self.icon)
            .with_priority(self.priority)
            .with_target_blank(self.target_blank)
    }
}

impl Shape for MenuItemInput {
    fn field_rules() -> FieldRules {
        FieldRules::new()
            .required("label", FieldKind::String)
            .required("url", FieldKind::String)
            .optional("icon", FieldKind::String)
            .optional_or("targetBlank", FieldKind::Bool, json!(false))
            .optional_or("priority", FieldKind::Integer, json!(DEFAULT_PRIORITY))
    }
}

/// A contributed static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInput {
    pub title: String,
    pub content: String,
}

impl PageInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Shape for PageInput {
    fn field_rules() -> FieldRules {
        FieldRules::new()
            .required("title", FieldKind::String)
            .required("content", FieldKind::String)
    }
}

/// Everything the content installer is about to write.
#[derive(Debug, Clone)]
pub struct ContentPlan {
    /// The site root page.
    pub home: Page,
    /// Contributed pages followed by the About page.
    pub pages: Vec<Page>,
    pub main_menu: Menu,
    pub footer_menu: Menu,
    /// The About item followed by contributed items.
    pub main_items: Vec<MenuItem>,
    /// Sitemap and RSS followed by contributed items.
    pub footer_items: Vec<MenuItem>,
}

impl ContentPlan {
    /// Builds the plan from shaped contributions.
    pub fn build(
        main: Vec<MenuItemInput>,
        footer: Vec<MenuItemInput>,
        pages: Vec<PageInput>,
        about_content: &str,
    ) -> Self {
        let main_menu = Menu::new(MenuId::new(), MAIN_MENU_KEY, "Main menu");
        let footer_menu = Menu::new(MenuId::new(), FOOTER_MENU_KEY, "Footer menu");

        let mut main_items = Vec::with_capacity(main.len() + 1);
        main_items.push(MenuItem::new(main_menu.id, "About", "/about/").with_priority(0));
        main_items.extend(main.into_iter().map(|input| input.into_item(main_menu.id)));

        let mut footer_items = vec![
            MenuItem::new(footer_menu.id, "Sitemap", "/sitemap.xml")
                .with_priority(1000)
                .with_target_blank(true),
            MenuItem::new(footer_menu.id, "RSS", "/rss.xml")
                .with_priority(900)
                .with_target_blank(true),
        ];
        footer_items.extend(footer.into_iter().map(|input| input.into_item(footer_menu.id)));

        let mut pages: Vec<Page> = pages
            .into_iter()
            .map(|input| Page::new(input.title, input.content))
            .collect();
        pages.push(Page::new("About", about_content));

        Self {
            home: Page::new("Home", HOME_PAGE_CONTENT),
            pages,
            main_menu,
            footer_menu,
            main_items,
            footer_items,
        }
    }

    /// Main items followed by footer items.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.main_items
            .iter()
            .chain(self.footer_items.iter())
            .cloned()
            .collect()
    }
}

/// A sequence of dependent writes that runs concurrently with the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteGroup {
    HomePage,
    Pages,
    Menus,
}

impl fmt::Display for WriteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HomePage => write!(f, "home-page"),
            Self::Pages => write!(f, "pages"),
            Self::Menus => write!(f, "menus"),
        }
    }
}

/// Counts of what a content installation wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    /// Pages including the home page.
    pub pages: usize,
    pub menus: usize,
    pub menu_items: usize,
}

/// Builds and writes the default frontend content.
#[derive(Debug, Clone)]
pub struct ContentInstaller {
    dispatcher: HookDispatcher,
    persistence: Persistence,
    about_content: String,
}

impl ContentInstaller {
    pub fn new(
        dispatcher: HookDispatcher,
        persistence: Persistence,
        about_content: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            persistence,
            about_content: about_content.into(),
        }
    }

    /// Gathers contributions and assembles the plan. Nothing is written.
    pub async fn plan(&self, ctx: &HookContext) -> AppResult<ContentPlan> {
        let main: Vec<MenuItemInput> = self
            .dispatcher
            .invoke_shaped(names::FRONTEND_MAIN_MENU_INSTALL, ctx)
            .await?;
        let footer: Vec<MenuItemInput> = self
            .dispatcher
            .invoke_shaped(names::FRONTEND_FOOTER_MENU_INSTALL, ctx)
            .await?;
        let pages: Vec<PageInput> = self
            .dispatcher
            .invoke_shaped(names::FRONTEND_PAGE_INSTALL, ctx)
            .await?;

        Ok(ContentPlan::build(main, footer, pages, &self.about_content))
    }

    /// Writes the plan.
    ///
    /// Waits for all three write-groups. If any failed, the first failure
    /// in group order is returned, wrapped with the group's name.
    pub async fn persist(&self, plan: &ContentPlan) -> AppResult<ContentSummary> {
        let (home, pages, menus) = futures::join!(
            self.write_home(&plan.home),
            self.write_pages(&plan.pages),
            self.write_menus(plan),
        );

        let mut first_failure = None;
        for (group, result) in [
            (WriteGroup::HomePage, home),
            (WriteGroup::Pages, pages),
            (WriteGroup::Menus, menus),
        ] {
            match result {
                Ok(()) => info!(write_group = %group, "Write-group completed"),
                Err(e) => {
                    error!(write_group = %group, error = %e, "Write-group failed");
                    if first_failure.is_none() {
                        first_failure = Some(AppError::with_source(
                            ErrorKind::Install,
                            format!("write-group '{group}' failed"),
                            e,
                        ));
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        Ok(ContentSummary {
            pages: plan.pages.len() + 1,
            menus: 2,
            menu_items: plan.main_items.len() + plan.footer_items.len(),
        })
    }

    /// Plans and persists in one step.
    pub async fn install(&self, ctx: &HookContext) -> AppResult<ContentSummary> {
        let plan = self.plan(ctx).await?;
        info!(
            pages = plan.pages.len() + 1,
            main_items = plan.main_items.len(),
            footer_items = plan.footer_items.len(),
            "Content plan assembled"
        );
        self.persist(&plan).await
    }

    async fn write_home(&self, home: &Page) -> AppResult<()> {
        self.persistence.pages.create(home).await?;
        self.persistence
            .metadata
            .update(&PageMetadata::published_home(home))
            .await
    }

    async fn write_pages(&self, pages: &[Page]) -> AppResult<()> {
        self.persistence.pages.create_all(pages).await?;

        let metadata: Vec<PageMetadata> = pages.iter().map(PageMetadata::published).collect();
        let published = join_all(
            metadata
                .iter()
                .map(|meta| self.persistence.metadata.update(meta)),
        )
        .await;

        published.into_iter().collect::<AppResult<Vec<()>>>()?;
        Ok(())
    }

    async fn write_menus(&self, plan: &ContentPlan) -> AppResult<()> {
        self.persistence
            .menus
            .create_all(&[plan.main_menu.clone(), plan.footer_menu.clone()])
            .await?;
        self.persistence.menu_items.create_all(&plan.menu_items()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use plume_core::traits::{Entity, Repository};
    use plume_core::types::MenuItemId;
    use plume_database::MemoryRepository;
    use plume_database::memory::MemoryPageRepository;
    use plume_entity::page::MetadataStatus;
    use plume_hooks::{ClosureHandler, HookRegistry, StaticRecordsHandler};

    fn record(value: serde_json::Value) -> plume_hooks::Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    async fn contribute(registry: &HookRegistry, event: &str, module: &str, values: Vec<serde_json::Value>) {
        registry
            .register(
                event,
                module,
                Arc::new(StaticRecordsHandler::new(values.into_iter().map(record).collect())),
            )
            .await;
    }

    fn installer(registry: Arc<HookRegistry>, persistence: Persistence) -> ContentInstaller {
        ContentInstaller::new(HookDispatcher::new(registry), persistence, "<p>About us</p>")
    }

    /// Logs every write as `kind:op:label` and optionally delays creates.
    struct Recording<E: Entity> {
        inner: Arc<dyn Repository<E>>,
        log: Arc<Mutex<Vec<String>>>,
        label: fn(&E) -> String,
        create_delay: Duration,
    }

    impl<E: Entity> std::fmt::Debug for Recording<E> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Recording").field("kind", &E::KIND).finish()
        }
    }

    impl<E: Entity> Recording<E> {
        fn wrap(inner: Arc<dyn Repository<E>>, log: &Arc<Mutex<Vec<String>>>, label: fn(&E) -> String) -> Self {
            Self {
                inner,
                log: log.clone(),
                label,
                create_delay: Duration::ZERO,
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.create_delay = delay;
            self
        }

        fn push(&self, op: &str, entity: &E) {
            let entry = format!("{}:{}:{}", E::KIND, op, (self.label)(entity));
            self.log.lock().unwrap().push(entry);
        }
    }

    #[async_trait]
    impl<E: Entity> Repository<E> for Recording<E> {
        async fn create(&self, entity: &E) -> AppResult<()> {
            tokio::time::sleep(self.create_delay).await;
            self.inner.create(entity).await?;
            self.push("create", entity);
            Ok(())
        }

        async fn update(&self, entity: &E) -> AppResult<()> {
            self.inner.update(entity).await?;
            self.push("update", entity);
            Ok(())
        }

        async fn find_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
            self.inner.find_by_id(id).await
        }

        async fn find_all(&self) -> AppResult<Vec<E>> {
            self.inner.find_all().await
        }

        async fn count(&self) -> AppResult<u64> {
            self.inner.count().await
        }
    }

    #[derive(Debug)]
    struct Failing;

    #[async_trait]
    impl Repository<MenuItem> for Failing {
        async fn create(&self, _entity: &MenuItem) -> AppResult<()> {
            Err(AppError::database("connection reset"))
        }

        async fn update(&self, _entity: &MenuItem) -> AppResult<()> {
            Err(AppError::database("connection reset"))
        }

        async fn find_by_id(&self, _id: &MenuItemId) -> AppResult<Option<MenuItem>> {
            Ok(None)
        }

        async fn find_all(&self) -> AppResult<Vec<MenuItem>> {
            Ok(Vec::new())
        }

        async fn count(&self) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_about_first_and_malformed_dropped() {
        let registry = Arc::new(HookRegistry::new());
        contribute(
            &registry,
            names::FRONTEND_MAIN_MENU_INSTALL,
            "one",
            vec![json!({"label": "A", "url": "/a"})],
        )
        .await;
        contribute(
            &registry,
            names::FRONTEND_MAIN_MENU_INSTALL,
            "two",
            vec![json!({"label": "", "url": "/b"})],
        )
        .await;

        let plan = installer(registry, Persistence::memory())
            .plan(&HookContext::new())
            .await
            .unwrap();

        let labels: Vec<&str> = plan.main_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["About", "A"]);
        assert_eq!(plan.main_items[0].priority, 0);
        assert_eq!(plan.main_items[0].url, "/about/");
        assert_eq!(plan.main_items[1].priority, DEFAULT_PRIORITY);
        assert!(!plan.main_items[1].target_blank);
        assert!(plan.main_items.iter().all(|i| i.menu_id == plan.main_menu.id));
    }

    #[tokio::test]
    async fn test_no_contributions_yields_fixed_entries() {
        let plan = installer(Arc::new(HookRegistry::new()), Persistence::memory())
            .plan(&HookContext::new())
            .await
            .unwrap();

        assert_eq!(plan.main_items.len(), 1);
        assert_eq!(plan.main_items[0].label, "About");

        let footer: Vec<(&str, i32, bool)> = plan
            .footer_items
            .iter()
            .map(|i| (i.label.as_str(), i.priority, i.target_blank))
            .collect();
        assert_eq!(footer, vec![("Sitemap", 1000, true), ("RSS", 900, true)]);

        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].title, "About");
        assert_eq!(plan.home.title, "Home");
        assert_eq!(plan.home.content, HOME_PAGE_CONTENT);
        assert_eq!(plan.main_menu.key, MAIN_MENU_KEY);
        assert_eq!(plan.footer_menu.key, FOOTER_MENU_KEY);
    }

    #[tokio::test]
    async fn test_contributed_pages_precede_about_and_footer_items_follow_fixed() {
        let registry = Arc::new(HookRegistry::new());
        contribute(
            &registry,
            names::FRONTEND_PAGE_INSTALL,
            "blog",
            vec![
                json!({"title": "Blog", "content": "[blog-home-page]"}),
                json!({"title": "Draft"}),
            ],
        )
        .await;
        contribute(
            &registry,
            names::FRONTEND_FOOTER_MENU_INSTALL,
            "blog",
            vec![json!({"label": "Feed", "url": "/blog/rss.xml", "targetBlank": true})],
        )
        .await;

        let plan = installer(registry, Persistence::memory())
            .plan(&HookContext::new())
            .await
            .unwrap();

        let titles: Vec<&str> = plan.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Blog", "About"]);

        let footer: Vec<&str> = plan.footer_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(footer, vec!["Sitemap", "RSS", "Feed"]);
        assert!(plan.footer_items[2].target_blank);
    }

    #[tokio::test]
    async fn test_install_publishes_everything() {
        let persistence = Persistence::memory();
        let summary = installer(Arc::new(HookRegistry::new()), persistence.clone())
            .install(&HookContext::new())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ContentSummary {
                pages: 2,
                menus: 2,
                menu_items: 3
            }
        );

        let metadata = persistence.metadata.find_all().await.unwrap();
        assert_eq!(metadata.len(), 2);
        assert!(metadata.iter().all(|m| m.status == MetadataStatus::Published));

        let home: Vec<_> = metadata.iter().filter(|m| m.is_home).collect();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].slug, "");
        assert_eq!(home[0].title, "Home");
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_waits_for_slow_create() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let metadata_store = Arc::new(MemoryRepository::<PageMetadata>::new());

        let mut persistence = Persistence::memory();
        persistence.pages = Arc::new(
            Recording::<Page>::wrap(
                Arc::new(MemoryPageRepository::new(metadata_store.clone())),
                &log,
                |p: &Page| p.title.clone(),
            )
            .slow(Duration::from_millis(50)),
        );
        persistence.metadata = Arc::new(Recording::<PageMetadata>::wrap(metadata_store, &log, |m: &PageMetadata| {
            m.title.clone()
        }));
        persistence.menus = Arc::new(
            Recording::<Menu>::wrap(Arc::new(MemoryRepository::<Menu>::new()), &log, |m: &Menu| m.key.clone())
                .slow(Duration::from_millis(30)),
        );
        persistence.menu_items = Arc::new(Recording::<MenuItem>::wrap(
            Arc::new(MemoryRepository::<MenuItem>::new()),
            &log,
            |i: &MenuItem| i.label.clone(),
        ));

        let registry = Arc::new(HookRegistry::new());
        contribute(
            &registry,
            names::FRONTEND_PAGE_INSTALL,
            "blog",
            vec![
                json!({"title": "Blog", "content": "posts"}),
                json!({"title": "Contact", "content": "mail"}),
            ],
        )
        .await;

        installer(registry, persistence)
            .install(&HookContext::new())
            .await
            .unwrap();

        let log = log.lock().unwrap().clone();
        let position = |entry: &str| log.iter().position(|e| e == entry).unwrap();

        assert!(position("page:create:Home") < position("page_metadata:update:Home"));

        let titles = ["Blog", "Contact", "About"];
        let last_page_create = titles
            .iter()
            .map(|t| position(&format!("page:create:{t}")))
            .max()
            .unwrap();
        let first_publish = titles
            .iter()
            .map(|t| position(&format!("page_metadata:update:{t}")))
            .min()
            .unwrap();
        assert!(last_page_create < first_publish);

        let last_menu = position("menu:create:main").max(position("menu:create:footer"));
        let first_item = position("menu_item:create:About");
        assert!(last_menu < first_item);
        assert!(first_item < position("menu_item:create:Sitemap"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_groups_overlap() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let metadata_store = Arc::new(MemoryRepository::<PageMetadata>::new());

        let mut persistence = Persistence::memory();
        persistence.pages = Arc::new(
            Recording::<Page>::wrap(
                Arc::new(MemoryPageRepository::new(metadata_store.clone())),
                &log,
                |p: &Page| p.title.clone(),
            )
            .slow(Duration::from_millis(50)),
        );
        persistence.metadata = metadata_store;
        persistence.menus = Arc::new(
            Recording::<Menu>::wrap(Arc::new(MemoryRepository::<Menu>::new()), &log, |m: &Menu| m.key.clone())
                .slow(Duration::from_millis(100)),
        );

        let content = installer(Arc::new(HookRegistry::new()), persistence.clone());
        let started = tokio::time::Instant::now();
        let task = tokio::spawn(async move { content.install(&HookContext::new()).await });

        // Menus are still being created while both page groups are done.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(persistence.pages.count().await.unwrap(), 2);
        let published = persistence
            .metadata
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|m| m.status == MetadataStatus::Published)
            .count();
        assert_eq!(published, 2);
        assert_eq!(persistence.menus.count().await.unwrap(), 1);
        assert_eq!(persistence.menu_items.count().await.unwrap(), 0);

        task.await.unwrap().unwrap();

        // Two menu creates set the pace; run one after another the groups take 300ms.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(250));
        assert_eq!(persistence.menu_items.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_failing_group_is_named_and_others_complete() {
        let mut persistence = Persistence::memory();
        persistence.menu_items = Arc::new(Failing);

        let err = installer(Arc::new(HookRegistry::new()), persistence.clone())
            .install(&HookContext::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Install);
        assert!(err.message.contains("'menus'"));
        assert_eq!(err.root_kind(), ErrorKind::Database);
        assert!(err.chain().contains("connection reset"));

        // The other groups ran to completion.
        assert_eq!(persistence.pages.count().await.unwrap(), 2);
        assert_eq!(persistence.menus.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_handler_failure_aborts_before_writes() {
        let registry = Arc::new(HookRegistry::new());
        registry
            .register(
                names::FRONTEND_PAGE_INSTALL,
                "broken",
                Arc::new(ClosureHandler::new(|_| async {
                    Err(AppError::internal("asset missing"))
                })),
            )
            .await;

        let persistence = Persistence::memory();
        let err = installer(registry, persistence.clone())
            .install(&HookContext::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Hook);
        assert_eq!(persistence.pages.count().await.unwrap(), 0);
    }
}
