use iced::widget::{column, container, image, pick_list, text, Column};
use iced::{Alignment, Color, Element, Length, Task, Theme};

use crate::config::Config;
use crate::error::ViewerError;
use crate::portrait::load_portrait;
use crate::state::data::Identity;
use crate::state::display::{DisplayState, LoadedCharacter};
use crate::state::store::CharacterStore;

/// Window title
pub const TITLE: &str = "Harry Potter Characters App";

/// Main application state
pub struct CharacterViewer {
    /// Where details are re-queried on every selection
    store: CharacterStore,
    portrait_box: u32,
    /// Loaded once at startup, in storage order
    identities: Vec<Identity>,
    /// Current dropdown choice; None until the first pick
    selected: Option<Identity>,
    /// Bumped per selection so late results from older picks can be dropped
    ticket: u64,
    display: DisplayState,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a character in the dropdown
    Selected(Identity),
    /// Background lookup and portrait load finished
    Loaded(u64, Result<LoadedCharacter, ViewerError>),
}

impl CharacterViewer {
    /// Create a new instance of the application around identities loaded at startup
    pub fn new(config: Config, identities: Vec<Identity>) -> (Self, Task<Message>) {
        let status = match identities.len() {
            0 => "The character store is empty.".to_string(),
            1 => "Ready. 1 character in the store.".to_string(),
            n => format!("Ready. {} characters in the store.", n),
        };

        (
            CharacterViewer {
                store: CharacterStore::new(config.database),
                portrait_box: config.portrait_box,
                identities,
                selected: None,
                ticket: 0,
                display: DisplayState::Empty,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Selected(identity) => {
                log::info!("👤 Selected {}", identity);

                self.ticket += 1;
                self.selected = Some(identity.clone());
                self.status = format!("Loading {}…", identity);

                let ticket = self.ticket;
                Task::perform(
                    load_selection(self.store.clone(), identity, self.portrait_box),
                    move |result| Message::Loaded(ticket, result),
                )
            }
            Message::Loaded(ticket, result) => {
                if ticket != self.ticket {
                    log::debug!(
                        "Dropping stale result for ticket {} (current {})",
                        ticket,
                        self.ticket
                    );
                    return Task::none();
                }

                // The ticket matches, so `selected` is the identity this result belongs to
                let Some(identity) = self.selected.clone() else {
                    return Task::none();
                };

                self.status = match &result {
                    Ok(loaded) if loaded.matches > 1 => format!(
                        "⚠️  {} characters are named {}; showing the first.",
                        loaded.matches, identity
                    ),
                    Ok(_) => String::new(),
                    Err(err) => {
                        log::warn!("Could not show {}: {}", identity, err);
                        "Could not load this character.".to_string()
                    }
                };

                self.display = DisplayState::render(identity, result);
                if let Some(shown) = self.display.identity() {
                    log::debug!("Display now shows {}", shown);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<'_, Message> {
        let picker = pick_list(
            self.identities.as_slice(),
            self.selected.as_ref(),
            Message::Selected,
        )
        .placeholder("Pick a character.")
        .width(Length::Fixed(320.0));

        let portrait: Element<Message> = match self.display.portrait() {
            Some(portrait) => image(portrait.handle.clone())
                .width(Length::Fixed(portrait.width as f32))
                .height(Length::Fixed(portrait.height as f32))
                .into(),
            None => text("").into(),
        };

        let details: Element<Message> = if let Some(caption) = self.display.caption() {
            text(caption).size(18).into()
        } else if let Some(message) = self.display.error_message() {
            text(message)
                .size(16)
                .color(Color::from_rgb(0.9, 0.4, 0.4))
                .into()
        } else {
            text("").into()
        };

        let content: Column<Message> = column![
            text("Harry Potter Characters")
                .size(32),

            picker,

            // Reserve the full box so the layout doesn't jump between portraits
            container(portrait)
                .center_x(Length::Fixed(self.portrait_box as f32))
                .center_y(Length::Fixed(self.portrait_box as f32)),

            details,

            text(&self.status)
                .size(14),
        ]
        .spacing(16)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Look the identity up and load its portrait on a blocking thread
async fn load_selection(
    store: CharacterStore,
    identity: Identity,
    portrait_box: u32,
) -> Result<LoadedCharacter, ViewerError> {
    tokio::task::spawn_blocking(move || load_selection_blocking(&store, &identity, portrait_box))
        .await
        .map_err(|e| ViewerError::Worker(e.to_string()))?
}

/// One connection, one query, one decode
fn load_selection_blocking(
    store: &CharacterStore,
    identity: &Identity,
    portrait_box: u32,
) -> Result<LoadedCharacter, ViewerError> {
    let lookup = store.lookup(identity)?;
    log::debug!("Found {} ({} matching rows)", lookup.character.identity(), lookup.matches);
    let image_path = store.resolve_image_path(&lookup.character.image_path);
    let portrait = load_portrait(&image_path, portrait_box)?;

    Ok(LoadedCharacter {
        character: lookup.character,
        matches: lookup.matches,
        portrait,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{create_store, row, write_png};

    fn viewer_for(store: &CharacterStore) -> CharacterViewer {
        let identities = store.list_identities().unwrap();
        let (viewer, _) = CharacterViewer::new(Config::new(store.path()), identities);
        viewer
    }

    #[test]
    fn test_starts_without_selection() {
        let (_dir, store) = create_store(&[row("Potter", "Harry", "Student", "harry.png")]);
        let viewer = viewer_for(&store);

        assert!(viewer.selected.is_none());
        assert!(viewer.display.identity().is_none());
        assert_eq!(viewer.status, "Ready. 1 character in the store.");
    }

    #[test]
    fn test_status_counts_several_characters() {
        let (_dir, store) = create_store(&[
            row("Potter", "Harry", "Student", "harry.png"),
            row("Weasley", "Ron", "Student", "ron.png"),
        ]);
        let viewer = viewer_for(&store);
        assert_eq!(viewer.status, "Ready. 2 characters in the store.");
    }

    #[test]
    fn test_empty_store_offers_nothing() {
        let (_dir, store) = create_store(&[]);
        let viewer = viewer_for(&store);

        assert!(viewer.identities.is_empty());
        assert_eq!(viewer.status, "The character store is empty.");
    }

    #[test]
    fn test_every_identity_loads_its_own_details() {
        let (dir, store) = create_store(&[
            row("Potter", "Harry", "Student", "harry.png"),
            row("Granger", "Hermione", "Student", "hermione.png"),
            row("McGonagall", "Minerva", "Professor", "minerva.png"),
        ]);
        write_png(dir.path(), "harry.png", 640, 480);
        write_png(dir.path(), "hermione.png", 200, 500);
        write_png(dir.path(), "minerva.png", 100, 100);

        for identity in store.list_identities().unwrap() {
            let loaded = load_selection_blocking(&store, &identity, 300).unwrap();
            assert_eq!(loaded.character.identity(), identity);
            assert!(loaded.portrait.width <= 300 && loaded.portrait.height <= 300);
        }
    }

    #[test]
    fn test_selecting_twice_shows_same_text() {
        let (dir, store) = create_store(&[row("Potter", "Harry", "Student", "harry.png")]);
        write_png(dir.path(), "harry.png", 64, 64);
        let mut viewer = viewer_for(&store);
        let harry = Identity::new("Potter", "Harry");

        let mut captions = Vec::new();
        for _ in 0..2 {
            let _ = viewer.update(Message::Selected(harry.clone()));
            let result = load_selection_blocking(&store, &harry, 300);
            let _ = viewer.update(Message::Loaded(viewer.ticket, result));
            captions.push(viewer.display.caption().map(str::to_string));
        }

        assert_eq!(captions[0], Some("Name: Harry Potter\nOccupation: Student".to_string()));
        assert_eq!(captions[0], captions[1]);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let (dir, store) = create_store(&[
            row("Potter", "Harry", "Student", "harry.png"),
            row("Weasley", "Ron", "Student", "ron.png"),
        ]);
        write_png(dir.path(), "harry.png", 32, 32);
        write_png(dir.path(), "ron.png", 32, 32);
        let mut viewer = viewer_for(&store);
        let harry = Identity::new("Potter", "Harry");
        let ron = Identity::new("Weasley", "Ron");

        let _ = viewer.update(Message::Selected(harry.clone()));
        let harry_ticket = viewer.ticket;
        let _ = viewer.update(Message::Selected(ron.clone()));

        let ron_result = load_selection_blocking(&store, &ron, 300);
        let _ = viewer.update(Message::Loaded(viewer.ticket, ron_result));
        let harry_result = load_selection_blocking(&store, &harry, 300);
        let _ = viewer.update(Message::Loaded(harry_ticket, harry_result));

        assert_eq!(viewer.display.identity(), Some(&ron));
        assert_eq!(viewer.display.caption(), Some("Name: Ron Weasley\nOccupation: Student"));
    }

    #[test]
    fn test_missing_image_replaces_whole_display() {
        let (dir, store) = create_store(&[
            row("Potter", "Harry", "Student", "harry.png"),
            row("Lovegood", "Luna", "Student", "luna.png"),
        ]);
        write_png(dir.path(), "harry.png", 32, 32);
        let mut viewer = viewer_for(&store);
        let harry = Identity::new("Potter", "Harry");
        let luna = Identity::new("Lovegood", "Luna");

        let _ = viewer.update(Message::Selected(harry.clone()));
        let result = load_selection_blocking(&store, &harry, 300);
        let _ = viewer.update(Message::Loaded(viewer.ticket, result));
        assert!(viewer.display.portrait().is_some());

        let _ = viewer.update(Message::Selected(luna.clone()));
        let result = load_selection_blocking(&store, &luna, 300);
        assert!(matches!(result, Err(ViewerError::ImageLoad { .. })));
        let _ = viewer.update(Message::Loaded(viewer.ticket, result));

        // Neither Harry's portrait nor Harry's caption survives
        assert_eq!(viewer.display.identity(), Some(&luna));
        assert!(viewer.display.portrait().is_none());
        assert!(viewer.display.caption().is_none());
        assert!(viewer.display.error_message().is_some());
        assert_eq!(viewer.status, "Could not load this character.");
    }

    #[test]
    fn test_ambiguous_name_is_reported() {
        let (dir, store) = create_store(&[
            row("Weasley", "Fred", "Student", "fred.png"),
            row("Weasley", "Fred", "Shopkeeper", "fred.png"),
        ]);
        write_png(dir.path(), "fred.png", 32, 32);
        let mut viewer = viewer_for(&store);
        let fred = Identity::new("Weasley", "Fred");

        let _ = viewer.update(Message::Selected(fred.clone()));
        let result = load_selection_blocking(&store, &fred, 300);
        let _ = viewer.update(Message::Loaded(viewer.ticket, result));

        assert_eq!(viewer.display.caption(), Some("Name: Fred Weasley\nOccupation: Student"));
        assert!(viewer.status.contains("2 characters are named Weasley, Fred"));
    }

    #[tokio::test]
    async fn test_async_load_selection() {
        let (dir, store) = create_store(&[row("Granger", "Hermione", "Student", "hermione.png")]);
        write_png(dir.path(), "hermione.png", 900, 600);
        let hermione = Identity::new("Granger", "Hermione");

        let loaded = load_selection(store, hermione.clone(), 300).await.unwrap();
        assert_eq!(loaded.character.identity(), hermione);
        assert_eq!(loaded.character.occupation, "Student");
        assert_eq!((loaded.portrait.width, loaded.portrait.height), (300, 200));
    }
}
