use std::collections::HashMap;

use iced::widget::{column, scrollable, stack, text_input};
use iced::{Element, Length, Size, Subscription, Task, Theme};

mod config;
mod state;
mod ui;
mod unsplash;

use state::data::FetchedPage;
use state::layout::WallGeometry;
use state::query::{QueryController, DEBOUNCE};
use state::wall::{is_close_to_bottom, FetchTicket, WallState};
use unsplash::UnsplashClient;

/// Fixed column count of the masonry wall.
const COLUMNS: usize = 2;

/// Initial window size; width seeds the wall geometry until the first
/// resize event arrives.
const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 900.0;

/// Main application state
struct UnsplashWall {
    /// Raw contents of the search box.
    input: String,
    /// Debounce bookkeeping and the committed query.
    query: QueryController,
    /// Pagination, errors, and the column set.
    wall: WallState,
    /// Current sizing constants, recomputed on window resize.
    geometry: WallGeometry,
    /// Display handles for the current query's probed images, keyed by
    /// image id. Cleared wholesale on query commit, together with the
    /// columns, so stale queries don't pin their image bytes forever.
    handles: HashMap<String, iced::widget::image::Handle>,
    client: UnsplashClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The search box text changed
    InputChanged(String),
    /// A debounce timer of the given generation elapsed
    DebounceElapsed(u64),
    /// The scroll position of the wall changed
    Scrolled(scrollable::Viewport),
    /// A fetch-and-probe cycle finished for the ticketed page
    PageFetched(FetchTicket, FetchedPage),
    /// The window was resized
    WindowResized(Size),
}

impl UnsplashWall {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Without an access key the app cannot talk to the API at all.
        let config = config::Config::load()
            .expect("Failed to load configuration. Set UNSPLASH_ACCESS_KEY or create config.json.");

        let app = Self::from_config(&config);

        println!("🖼️  Unsplash Wall ready ({COLUMNS} columns)");

        (app, Task::none())
    }

    fn from_config(config: &config::Config) -> Self {
        UnsplashWall {
            input: String::new(),
            query: QueryController::new(),
            wall: WallState::new(COLUMNS),
            geometry: WallGeometry::for_viewport(WINDOW_WIDTH, COLUMNS),
            handles: HashMap::new(),
            client: UnsplashClient::new(config),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value.clone();
                let generation = self.query.note_input(value);

                // Schedule the quiet-period timer; only the newest
                // generation will be allowed to commit.
                Task::perform(
                    async move {
                        tokio::time::sleep(DEBOUNCE).await;
                        generation
                    },
                    Message::DebounceElapsed,
                )
            }
            Message::DebounceElapsed(generation) => {
                match self.query.try_commit(generation) {
                    Some(query) => {
                        println!("🔍 Searching for \"{query}\"");
                        // The previous query's handles die with its
                        // columns; keeping them would pin every past
                        // search's image bytes for the process lifetime.
                        self.handles.clear();
                        let ticket = self.wall.start_query();
                        self.fetch(ticket, query)
                    }
                    None => Task::none(),
                }
            }
            Message::Scrolled(viewport) => self.on_scroll(
                viewport.bounds().height,
                viewport.absolute_offset().y,
                viewport.content_bounds().height,
            ),
            Message::PageFetched(ticket, page) => {
                if self.wall.is_current(ticket.epoch) {
                    if let Some(results) = &page.results {
                        for probed in &results.images {
                            self.handles
                                .entry(probed.image.id.clone())
                                .or_insert_with(|| {
                                    iced::widget::image::Handle::from_bytes(probed.bytes.clone())
                                });
                        }
                    }
                }

                self.wall.apply_page(ticket, &self.geometry, page);
                Task::none()
            }
            Message::WindowResized(size) => {
                // Already-laid bricks keep their dimensions; the new
                // geometry applies to subsequently fetched pages.
                self.geometry = WallGeometry::for_viewport(size.width, COLUMNS);
                Task::none()
            }
        }
    }

    /// React to a scroll-position change: near the bottom, advance the
    /// pagination and fetch the next page.
    ///
    /// The committed query is read before a ticket is taken, so the wall
    /// never enters `Loading` without a fetch actually being issued.
    fn on_scroll(&mut self, visible: f32, offset: f32, content: f32) -> Task<Message> {
        if is_close_to_bottom(visible, offset, content) {
            if let Some(query) = self.query.committed().map(str::to_string) {
                if let Some(ticket) = self.wall.request_next_page() {
                    println!("📄 Requesting page {}", ticket.page);
                    return self.fetch(ticket, query);
                }
            }
        }

        Task::none()
    }

    /// Launch the fetch-and-probe pipeline for one ticketed page.
    fn fetch(&self, ticket: FetchTicket, query: String) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move { unsplash::fetch_page(&client, &query, ticket.page).await },
            move |page| Message::PageFetched(ticket, page),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let search_box = text_input("Co chcesz obejrzeć?", &self.input)
            .on_input(Message::InputChanged)
            .padding(10);

        let wall = scrollable(ui::wall::wall_view(&self.wall, &self.geometry, &self.handles))
            .on_scroll(Message::Scrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        let content = column![search_box, wall].spacing(10).padding(10);

        if self.wall.loading() {
            stack![content, ui::wall::loading_overlay()].into()
        } else {
            content.into()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Track window resizes so the wall geometry follows the viewport.
    fn subscription(&self) -> Subscription<Message> {
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::data::{PageResults, ProbedImage, SizedImage};

    fn test_app() -> UnsplashWall {
        let config: config::Config =
            serde_json::from_str(r#"{"access_key": "test-key"}"#).unwrap();
        UnsplashWall::from_config(&config)
    }

    fn page_with(id: &str, total_pages: u32) -> FetchedPage {
        FetchedPage {
            errors: Vec::new(),
            results: Some(PageResults {
                images: vec![ProbedImage {
                    image: SizedImage {
                        id: id.to_string(),
                        url: format!("https://example.com/{id}.jpg"),
                        width: 100,
                        height: 100,
                    },
                    bytes: vec![0u8; 16],
                }],
                total_pages,
            }),
        }
    }

    #[test]
    fn test_handles_cleared_on_new_query() {
        let mut app = test_app();

        // First committed query loads a page and caches its handle.
        let _ = app.update(Message::InputChanged("cat".to_string()));
        let _ = app.update(Message::DebounceElapsed(1));
        let _ = app.update(Message::PageFetched(
            FetchTicket { epoch: 1, page: 1 },
            page_with("a", 3),
        ));
        assert!(app.handles.contains_key("a"));

        // Committing a different query must drop the old query's bytes
        // along with its columns.
        let _ = app.update(Message::InputChanged("dogs".to_string()));
        let _ = app.update(Message::DebounceElapsed(2));
        assert!(app.handles.is_empty());

        let _ = app.update(Message::PageFetched(
            FetchTicket { epoch: 2, page: 1 },
            page_with("b", 3),
        ));
        assert!(app.handles.contains_key("b"));
        assert!(!app.handles.contains_key("a"));
    }

    #[test]
    fn test_scroll_without_query_keeps_wall_idle() {
        let mut app = test_app();

        // Put the wall into a pageable state without going through the
        // query controller, so no query is committed.
        let ticket = app.wall.start_query();
        app.wall
            .apply_page(ticket, &app.geometry, page_with("a", 5));
        assert!(app.query.committed().is_none());

        // Near-bottom scroll: with nothing to search for, the wall must
        // stay idle instead of entering a load that never resolves.
        let _ = app.on_scroll(600.0, 400.0, 1020.0);
        assert!(!app.wall.loading());
        assert_eq!(app.wall.page(), 1);
    }

    #[test]
    fn test_scroll_with_query_advances() {
        let mut app = test_app();

        let _ = app.update(Message::InputChanged("cat".to_string()));
        let _ = app.update(Message::DebounceElapsed(1));
        let _ = app.update(Message::PageFetched(
            FetchTicket { epoch: 1, page: 1 },
            page_with("a", 5),
        ));

        let _ = app.on_scroll(600.0, 400.0, 1020.0);
        assert!(app.wall.loading());
        assert_eq!(app.wall.page(), 2);
    }
}

fn main() -> iced::Result {
    iced::application("Unsplash Wall", UnsplashWall::update, UnsplashWall::view)
        .theme(UnsplashWall::theme)
        .subscription(UnsplashWall::subscription)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .centered()
        .run_with(UnsplashWall::new)
}
