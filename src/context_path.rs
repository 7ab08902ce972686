use core::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use itertools::Itertools;

/// A segment of a context path.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Segment {
    /// A map key, i.e. an element tag or an `@`-prefixed attribute name.
    Key(String),
    /// A list index.
    Index(usize),
}

impl Segment {
    /// Returns a key if the segment is one.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns `true` if the segment is a key equal to a marker ignoring ASCII case.
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.as_key()
            .is_some_and(|key| key.eq_ignore_ascii_case(marker))
    }
}

impl Display for Segment {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(formatter, "{key}"),
            Self::Index(index) => write!(formatter, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.into())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A context path locating a node in a raw schema tree.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ContextPath(Vec<Segment>);

impl ContextPath {
    /// Creates a context path.
    pub const fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Returns segments.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns a number of segments.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segment.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a child path.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Truncates a path with slice semantics.
    ///
    /// A negative offset drops that many trailing segments while a
    /// non-negative one keeps that many leading segments. Offsets out of
    /// range are clamped.
    pub fn truncate(&self, offset: isize) -> Self {
        Self(self.0[..self.resolve_end(offset)].to_vec())
    }

    /// Returns a segment at an offset counted from the end if negative.
    pub fn segment(&self, offset: isize) -> Option<&Segment> {
        let index = if offset < 0 {
            self.0.len().checked_sub(offset.unsigned_abs())?
        } else {
            offset.unsigned_abs()
        };

        self.0.get(index)
    }

    /// Returns up to `count` trailing segments.
    pub fn tail(&self, count: usize) -> &[Segment] {
        &self.0[self.0.len().saturating_sub(count)..]
    }

    /// Returns `true` if the path is a strict ancestor of another.
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Returns ancestors from the nearest to the farthest.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.0.len()).rev().map(|length| Self(self.0[..length].to_vec()))
    }

    const fn resolve_end(&self, offset: isize) -> usize {
        let length = self.0.len();

        if offset < 0 {
            length.saturating_sub(offset.unsigned_abs())
        } else if offset.unsigned_abs() < length {
            offset.unsigned_abs()
        } else {
            length
        }
    }
}

impl Display for ContextPath {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "/{}", self.0.iter().join("/"))
    }
}

impl FromStr for ContextPath {
    type Err = Infallible;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            string
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| {
                    segment
                        .parse::<usize>()
                        .map_or_else(|_| Segment::from(segment), Segment::Index)
                })
                .collect(),
        ))
    }
}

impl<S: Into<Segment>> FromIterator<S> for ContextPath {
    fn from_iter<I: IntoIterator<Item = S>>(iterator: I) -> Self {
        Self(iterator.into_iter().map(Into::into).collect())
    }
}
