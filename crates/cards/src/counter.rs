use cube_content::{
    CardContent, CardDescriptor, CardFragment, ContentError, ContentId, ContentResult, Properties,
};

use crate::props;

const ID: &str = "Counter";

#[derive(Debug, Default)]
pub struct CounterCard;

impl CardContent for CounterCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(ID, "Counter", "Click counter with a configurable start and step.")
    }

    fn render(&self, properties: &Properties) -> ContentResult<CardFragment> {
        let id = ContentId::new(ID);
        let initial = props::integer(&id, properties, "initial")?.unwrap_or(0);
        let step = props::integer(&id, properties, "step")?.unwrap_or(1);
        if step == 0 {
            return Err(ContentError::invalid(&id, "`step` must be non-zero"));
        }
        let title = props::string(&id, properties, "title")?.unwrap_or("Counter");
        Ok(CardFragment::new(id, title)
            .line(format!("Count: {initial}"))
            .line(format!("Step: {step}")))
    }
}
