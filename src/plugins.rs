//! The optional plugin surface from spec.md §6: an AST transform hook run
//! between parse and render, and a renderer post-process hook run on the
//! final HTML string. Ported from comrak's broken-link-callback adapter
//! pattern (a boxed `dyn Fn` stored by reference on the caller's side,
//! rather than any global registry) — these hooks are passed explicitly
//! into `render`/`parse_checked`, never registered implicitly.

use crate::nodes::Document;

/// An AST transform hook: `Document -> Document`, run between parse and
/// render. Hooks run in ascending `priority` order; lower runs first.
/// Default priority is 50, matching comrak's own extension-ordering
/// convention for its option groups.
pub struct TransformHook {
    pub priority: i32,
    pub transform: Box<dyn Fn(Document) -> Document>,
}

impl TransformHook {
    pub fn new(transform: impl Fn(Document) -> Document + 'static) -> Self {
        TransformHook {
            priority: 50,
            transform: Box::new(transform),
        }
    }

    pub fn with_priority(priority: i32, transform: impl Fn(Document) -> Document + 'static) -> Self {
        TransformHook {
            priority,
            transform: Box::new(transform),
        }
    }
}

/// A renderer post-process hook: `String -> String`, run on the final HTML.
pub struct PostProcessHook {
    pub post_process: Box<dyn Fn(String) -> String>,
}

impl PostProcessHook {
    pub fn new(post_process: impl Fn(String) -> String + 'static) -> Self {
        PostProcessHook {
            post_process: Box::new(post_process),
        }
    }
}

/// A set of registered hooks, applied in order by [`crate::render_with_plugins`].
#[derive(Default)]
pub struct Plugins {
    pub transforms: Vec<TransformHook>,
    pub post_processes: Vec<PostProcessHook>,
}

impl Plugins {
    pub fn new() -> Self {
        Plugins::default()
    }

    pub fn add_transform(&mut self, hook: TransformHook) {
        self.transforms.push(hook);
    }

    pub fn add_post_process(&mut self, hook: PostProcessHook) {
        self.post_processes.push(hook);
    }

    pub(crate) fn apply_transforms(&self, mut document: Document) -> Document {
        let mut ordered: Vec<&TransformHook> = self.transforms.iter().collect();
        ordered.sort_by_key(|h| h.priority);
        for hook in ordered {
            document = (hook.transform)(document);
        }
        document
    }

    pub(crate) fn apply_post_processes(&self, mut html: String) -> String {
        for hook in &self.post_processes {
            html = (hook.post_process)(html);
        }
        html
    }
}
