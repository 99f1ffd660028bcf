/// Generates `register_all_cards`, which registers every listed card type
/// (constructed through `Default`) with a `ContentRegistry`.
#[macro_export]
macro_rules! define_cards {
    ($($card_type:ty),* $(,)?) => {
        pub fn register_all_cards(
            registry: &mut $crate::ContentRegistry,
        ) -> $crate::ContentResult<()> {
            $(
                registry.register(Box::new(<$card_type>::default()))?;
            )*
            Ok(())
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{CardContent, CardDescriptor, CardFragment, ContentId, ContentRegistry, ContentResult, Properties};

    #[derive(Default)]
    struct Alpha;

    #[derive(Default)]
    struct Beta;

    impl CardContent for Alpha {
        fn descriptor(&self) -> CardDescriptor {
            CardDescriptor::new("Alpha", "Alpha", "first")
        }

        fn render(&self, _properties: &Properties) -> ContentResult<CardFragment> {
            Ok(CardFragment::new(ContentId::new("Alpha"), "Alpha"))
        }
    }

    impl CardContent for Beta {
        fn descriptor(&self) -> CardDescriptor {
            CardDescriptor::new("Beta", "Beta", "second")
        }

        fn render(&self, _properties: &Properties) -> ContentResult<CardFragment> {
            Ok(CardFragment::new(ContentId::new("Beta"), "Beta"))
        }
    }

    mod builtin {
        use super::{Alpha, Beta};
        crate::define_cards!(Alpha, Beta);
    }

    #[test]
    fn macro_registers_every_listed_card() {
        let mut registry = ContentRegistry::default();
        builtin::register_all_cards(&mut registry).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&ContentId::new("Beta")));

        // a second pass collides with the first
        assert!(builtin::register_all_cards(&mut registry).is_err());
    }
}
