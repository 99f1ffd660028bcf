//! Static text cards describing the project from three angles.

use cube_content::{CardContent, CardDescriptor, CardFragment, ContentId, ContentResult, Properties};

use crate::props;

fn info_fragment(
    id: &str,
    default_title: &str,
    default_lines: &[&str],
    properties: &Properties,
) -> ContentResult<CardFragment> {
    let id = ContentId::new(id);
    let title = props::string(&id, properties, "title")?
        .unwrap_or(default_title)
        .to_owned();
    let description = props::string(&id, properties, "description")?.map(str::to_owned);

    let mut fragment = CardFragment::new(id, title);
    match description {
        Some(description) => fragment = fragment.line(description),
        None => {
            for line in default_lines {
                fragment = fragment.line(*line);
            }
        }
    }
    Ok(fragment)
}

#[derive(Debug, Default)]
pub struct AbstractSpecCard;

impl CardContent for AbstractSpecCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(
            "AbstractSpec",
            "Abstract Specification",
            "High-level system design and requirements.",
        )
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        info_fragment(
            "AbstractSpec",
            "Abstract Specification",
            &["What the system must do, independent of how."],
            properties,
        )
    }
}

#[derive(Debug, Default)]
pub struct ConcreteImplCard;

impl CardContent for ConcreteImplCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(
            "ConcreteImpl",
            "Concrete Implementation",
            "Actual system implementation details.",
        )
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        info_fragment(
            "ConcreteImpl",
            "Concrete Implementation",
            &["How the specification is realised in code."],
            properties,
        )
    }
}

#[derive(Debug, Default)]
pub struct RealisticExpectationsCard;

impl CardContent for RealisticExpectationsCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(
            "RealisticExpectations",
            "Realistic Expectations",
            "Project constraints and limitations.",
        )
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        info_fragment(
            "RealisticExpectations",
            "Realistic Expectations",
            &["Constraints, limits and trade-offs."],
            properties,
        )
    }
}
