//! Immutable render context threaded through rendering.
//!
//! A [`RenderContext`] carries cross-cutting state (nesting depth and typed
//! slot values) from a parent to its children. Every "modification" returns a
//! new context; the value seen by a parent is never changed by a child.
//!
//! Element rendering reads [`MAX_DEPTH`]: children below that depth are not
//! written.
//!
//! ## Example
//!
//! ```
//! use simplypages_core::{RenderContext, SlotKey};
//!
//! static THEME: SlotKey<&'static str> = SlotKey::with_default("theme", || "light");
//!
//! let ctx = RenderContext::empty();
//! assert_eq!(ctx.get(&THEME), Some("light"));
//!
//! let dark = ctx.with(&THEME, "dark");
//! assert_eq!(dark.get(&THEME), Some("dark"));
//! assert_eq!(ctx.get(&THEME), Some("light"));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type SlotValue = Arc<dyn Any + Send + Sync>;

/// Deepest element level whose children are still rendered.
pub static MAX_DEPTH: SlotKey<usize> = SlotKey::with_default("max_depth", || 256);

/// A typed key for a value stored in a [`RenderContext`].
///
/// Keys are compared by name. A lookup whose stored value has a different
/// type than the key falls back to the key's default.
pub struct SlotKey<T: 'static> {
	name: &'static str,
	default: Option<fn() -> T>,
	_marker: PhantomData<fn() -> T>,
}

impl<T: 'static> SlotKey<T> {
	/// Creates a key without a default value.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			default: None,
			_marker: PhantomData,
		}
	}

	/// Creates a key whose lookups fall back to `default`.
	pub const fn with_default(name: &'static str, default: fn() -> T) -> Self {
		Self {
			name,
			default: Some(default),
			_marker: PhantomData,
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl<T: 'static> fmt::Debug for SlotKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SlotKey{{{}}}", self.name)
	}
}

/// Immutable render state.
#[derive(Clone, Default)]
pub struct RenderContext {
	values: Arc<HashMap<&'static str, SlotValue>>,
	depth: usize,
}

impl RenderContext {
	/// Returns a context with no values at depth zero.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Starts building a context with initial slot values.
	pub fn builder() -> RenderContextBuilder {
		RenderContextBuilder::default()
	}

	/// Returns the stored value for `key`, or the key's default.
	pub fn get<T>(&self, key: &SlotKey<T>) -> Option<T>
	where
		T: Clone + Send + Sync + 'static,
	{
		self.values
			.get(key.name)
			.and_then(|value| value.downcast_ref::<T>())
			.cloned()
			.or_else(|| key.default.map(|default| default()))
	}

	/// Returns a new context with `key` bound to `value`.
	pub fn with<T>(&self, key: &SlotKey<T>, value: T) -> Self
	where
		T: Send + Sync + 'static,
	{
		let mut values = (*self.values).clone();
		values.insert(key.name, Arc::new(value));
		Self {
			values: Arc::new(values),
			depth: self.depth,
		}
	}

	/// Returns the context used for the children of the current node.
	pub fn descend(&self) -> Self {
		Self {
			values: Arc::clone(&self.values),
			depth: self.depth + 1,
		}
	}

	/// Nesting depth; the root is zero.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Whether children at the next level may still be written.
	pub fn within_depth_limit(&self) -> bool {
		self.get(&MAX_DEPTH).is_none_or(|limit| self.depth < limit)
	}
}

impl fmt::Debug for RenderContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<_> = self.values.keys().collect();
		keys.sort();
		f.debug_struct("RenderContext")
			.field("keys", &keys)
			.field("depth", &self.depth)
			.finish()
	}
}

/// Builder for a [`RenderContext`] with initial values.
#[derive(Default)]
pub struct RenderContextBuilder {
	values: HashMap<&'static str, SlotValue>,
}

impl RenderContextBuilder {
	/// Binds a slot value.
	pub fn with<T>(mut self, key: &SlotKey<T>, value: T) -> Self
	where
		T: Send + Sync + 'static,
	{
		self.values.insert(key.name, Arc::new(value));
		self
	}

	pub fn build(self) -> RenderContext {
		RenderContext {
			values: Arc::new(self.values),
			..RenderContext::default()
		}
	}
}
