use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

///
/// ErrorTree
///
/// Route-keyed accumulation of validation messages. Validation passes push
/// into a tree instead of failing fast so one run reports every problem.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Add a message at the root of this tree.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Add a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Merge another tree under a child route, dropping it if empty.
    pub fn merge_for(&mut self, route: impl Into<String>, other: Self) {
        if other.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(other.messages);
        for (key, tree) in other.children {
            child.merge_for(key, tree);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Number of messages in the whole tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs, routes joined with `.`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }

        for (key, child) in &self.children {
            let route = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            child.flatten_into(&route, out);
        }
    }

    /// Consume the tree, returning `Err(self)` if it holds any message.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (route, message) in self.flatten() {
            if route.is_empty() {
                writeln!(f, "{message}")?;
            } else {
                writeln!(f, "{route}: {message}")?;
            }
        }

        Ok(())
    }
}

/// Push a formatted message into an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// TESTS
///
