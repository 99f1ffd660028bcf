//! Built-in cards hosted on cube faces.

mod clock;
mod counter;
mod info;
mod notes;
mod props;
mod todo;

pub use clock::ClockCard;
pub use counter::CounterCard;
pub use info::{AbstractSpecCard, ConcreteImplCard, RealisticExpectationsCard};
pub use notes::NotesCard;
pub use todo::TodoListCard;

use cube_content::{ContentRegistry, ContentResult};

// Registers every built-in card with the content registry.
cube_content::define_cards!(
    AbstractSpecCard,
    ConcreteImplCard,
    RealisticExpectationsCard,
    ClockCard,
    CounterCard,
    NotesCard,
    TodoListCard,
);

/// Registry pre-populated with the built-in cards.
pub fn builtin_registry() -> ContentResult<ContentRegistry> {
    let mut registry = ContentRegistry::default();
    register_all_cards(&mut registry)?;
    Ok(registry)
}
