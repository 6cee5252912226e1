//! Structural edges of every node kind the walker can pass through.

use indexmap::IndexMap;

use super::walker::{Component, Reachable, ReachabilityWalker};
use crate::{
  document::{
    Callback, Components, Content, Document, Extensions, Header, MediaType, ObjectSchema, Operation, Parameter,
    PathItem, RefOr, RequestBody, Response, Schema, SchemaRef,
  },
  refs::ComponentKind,
};

impl Reachable for Document {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.paths.iter().flat_map(|paths| paths.values()));
    walker.walk_all(self.webhooks.values());
  }
}

impl Reachable for PathItem {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(&self.parameters);
    for (_, operation) in self.operations() {
      walker.walk(operation);
    }
    if let Some(ref_path) = &self.ref_path {
      walker.follow::<PathItem>(ref_path);
    }
  }
}

impl Reachable for Operation {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(&self.parameters);
    walker.walk_all(self.request_body.as_ref());
    walker.walk_all(self.responses.iter().flat_map(|responses| responses.values()));
    walker.walk_all(self.callbacks.values());
  }
}

impl<T: Component, S: Reachable> Reachable for RefOr<T, S> {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    match self {
      Self::Ref(reference) => {
        walker.follow::<T>(&reference.ref_path);
        walker.walk(&reference.siblings);
      }
      Self::Item(item) => walker.walk(item),
    }
  }
}

/// Keys the model does not interpret never lead anywhere.
impl Reachable for Extensions {
  fn visit(&self, _walker: &mut ReachabilityWalker<'_>) {}
}

impl Reachable for Schema {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    match self {
      Self::Boolean(_) => {}
      Self::Object(object) => walker.walk::<ObjectSchema>(object),
    }
  }
}

impl Reachable for ObjectSchema {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(&self.one_of);
    walker.walk_all(&self.any_of);
    walker.walk_all(&self.all_of);
    walker.walk_all(self.not.as_deref());
    walker.walk_all(self.items.as_deref());
    walker.walk_all(self.additional_properties.as_deref());
    walker.walk_all(self.properties.values());
    walker.walk_all(&self.prefix_items);
    walker.walk_all(self.pattern_properties.values());
    walker.walk_all(self.contains.as_deref());
    walker.walk_all(self.property_names.as_deref());
    walker.walk_all(self.dependent_schemas.values());
    walker.walk_all(self.if_schema.as_deref());
    walker.walk_all(self.then_schema.as_deref());
    walker.walk_all(self.else_schema.as_deref());
    walker.walk_all(self.unevaluated_items.as_deref());
    walker.walk_all(self.unevaluated_properties.as_deref());
    walker.walk_all(self.defs.values());
  }
}

impl Reachable for MediaType {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.schema.as_ref());
  }
}

impl Reachable for Content {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.values());
  }
}

impl Reachable for Parameter {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.schema.as_ref());
    walker.walk_all(self.content.as_ref());
  }
}

impl Reachable for Header {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.schema.as_ref());
    walker.walk_all(self.content.as_ref());
  }
}

impl Reachable for RequestBody {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk(&self.content);
  }
}

impl Reachable for Response {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.headers.values());
    walker.walk(&self.content);
  }
}

impl Reachable for Callback {
  fn visit(&self, walker: &mut ReachabilityWalker<'_>) {
    walker.walk_all(self.values());
  }
}

impl Component for Schema {
  const KIND: ComponentKind = ComponentKind::Schemas;
  type Entry = SchemaRef;

  fn table(components: &Components) -> &IndexMap<String, SchemaRef> {
    &components.schemas
  }
}

impl Component for Response {
  const KIND: ComponentKind = ComponentKind::Responses;
  type Entry = RefOr<Self>;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry> {
    &components.responses
  }
}

impl Component for Parameter {
  const KIND: ComponentKind = ComponentKind::Parameters;
  type Entry = RefOr<Self>;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry> {
    &components.parameters
  }
}

impl Component for RequestBody {
  const KIND: ComponentKind = ComponentKind::RequestBodies;
  type Entry = RefOr<Self>;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry> {
    &components.request_bodies
  }
}

impl Component for Header {
  const KIND: ComponentKind = ComponentKind::Headers;
  type Entry = RefOr<Self>;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry> {
    &components.headers
  }
}

impl Component for Callback {
  const KIND: ComponentKind = ComponentKind::Callbacks;
  type Entry = RefOr<Self>;

  fn table(components: &Components) -> &IndexMap<String, Self::Entry> {
    &components.callbacks
  }
}

impl Component for PathItem {
  const KIND: ComponentKind = ComponentKind::PathItems;
  type Entry = PathItem;

  fn table(components: &Components) -> &IndexMap<String, PathItem> {
    &components.path_items
  }
}
