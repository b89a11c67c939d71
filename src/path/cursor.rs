//! Path cursor - tokenizer and bidirectional navigation over path segments.
//!
//! # Hot Path
//!
//! A fresh cursor is created for every resolved request. Segments are kept in a
//! `SmallVec` so that typical paths (≤8 segments) do not need a second heap
//! allocation for the segment list. Derived strings (sub-paths, the textual
//! form of the last segment) are recomputed on demand and never cached.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

use super::error::CursorError;
use super::options::{normalize, PathOptions, DEFAULT_PATH_SEPARATOR};

/// Maximum number of path segments stored inline before spilling to the heap.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Segment storage for the cursor.
pub type SegmentVec = SmallVec<[String; MAX_INLINE_SEGMENTS]>;

/// Saved navigation state of a [`PathCursor`].
///
/// Obtained from [`PathCursor::mark`] and handed back to [`PathCursor::reset`]
/// to undo any navigation (and view toggling) performed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorMark {
    position: usize,
    extension_to_segment: bool,
}

/// A tokenized path with a movable position.
///
/// The segments and the extension are fixed at construction; only the position
/// and the extension view toggle change afterwards.
///
/// # Parsing
///
/// Empty tokens are dropped, so consecutive, leading and trailing separators
/// collapse silently. An empty input produces zero segments. When an extension
/// separator is configured, the text after its rightmost occurrence in the last
/// segment becomes the extension (subject to the allow-list in [`PathOptions`]).
///
/// ```rust
/// use brrtpath::path::{PathCursor, PathOptions};
///
/// let options = PathOptions::default().extension_separator(".");
/// let cursor = PathCursor::parse("/path/to////my/web-page.rss", &options);
///
/// assert_eq!(cursor.segments(), ["path", "to", "my", "web-page"]);
/// assert_eq!(cursor.extension(), Some("rss"));
/// assert_eq!(cursor.to_string(), "/path/to/my/web-page.rss");
/// ```
///
/// # Navigating
///
/// `position` is a zero-based index in `[0, len]`. [`has_next`](Self::has_next)
/// and [`has_previous`](Self::has_previous) tell whether
/// [`advance`](Self::advance)/[`retreat`](Self::retreat) may be called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCursor {
    segments: SegmentVec,
    extension: Option<String>,
    path_separator: Option<String>,
    extension_separator: Option<String>,
    position: usize,
    extension_to_segment: bool,
}

impl Default for PathCursor {
    fn default() -> Self {
        Self {
            segments: SegmentVec::new(),
            extension: None,
            path_separator: Some(DEFAULT_PATH_SEPARATOR.to_string()),
            extension_separator: None,
            position: 0,
            extension_to_segment: false,
        }
    }
}

impl PathCursor {
    /// Tokenize `path` on `/` without extension extraction.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self::parse(path, &PathOptions::default())
    }

    /// Tokenize `path` on the given separators, accepting any extension.
    ///
    /// `None` or an empty string disables the corresponding separator.
    #[must_use]
    pub fn with_separators(
        path: &str,
        path_separator: Option<&str>,
        extension_separator: Option<&str>,
    ) -> Self {
        Self::parse(path, &PathOptions::new(path_separator, extension_separator))
    }

    /// Tokenize `path` according to `options`.
    #[must_use]
    pub fn parse(path: &str, options: &PathOptions) -> Self {
        let path_separator = options.effective_path_separator();
        let extension_separator = options.effective_extension_separator();

        let mut segments: SegmentVec = match path_separator {
            _ if path.is_empty() => SegmentVec::new(),
            None => std::iter::once(path.to_string()).collect(),
            Some(sep) => path
                .split(sep)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        };

        let mut extension = None;
        if let (Some(ext_sep), Some(last)) = (extension_separator, segments.last_mut()) {
            if let Some(index) = last.rfind(ext_sep) {
                let candidate = &last[index + ext_sep.len()..];
                // "name." and ".name" stay whole
                if !candidate.is_empty() && index > 0 {
                    if let Some(accepted) = options.accept_extension(candidate) {
                        last.truncate(index);
                        extension = Some(accepted);
                    }
                }
            }
        }

        Self {
            segments,
            extension,
            path_separator: path_separator.map(str::to_string),
            extension_separator: extension_separator.map(str::to_string),
            position: 0,
            extension_to_segment: false,
        }
    }

    /// Build a cursor from already-resolved parts.
    ///
    /// Empty separators and an empty extension are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a construction error when a segment is empty or contains the path
    /// separator, when more than one segment is given without a path separator,
    /// or when an extension is given without an extension separator.
    pub fn from_parts<I, S>(
        segments: I,
        extension: Option<&str>,
        path_separator: Option<&str>,
        extension_separator: Option<&str>,
    ) -> Result<Self, CursorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path_separator = normalize(path_separator);
        let extension_separator = normalize(extension_separator);
        let extension = extension.filter(|e| !e.is_empty());
        let segments: SegmentVec = segments.into_iter().map(Into::into).collect();

        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(CursorError::EmptySegment { index });
            }
            if let Some(sep) = &path_separator {
                if segment.contains(sep.as_str()) {
                    return Err(CursorError::SegmentContainsSeparator {
                        index,
                        segment: segment.clone(),
                    });
                }
            }
        }

        if path_separator.is_none() && segments.len() > 1 {
            return Err(CursorError::MultipleSegmentsWithoutSeparator {
                count: segments.len(),
            });
        }

        if let (None, Some(ext)) = (&extension_separator, extension) {
            return Err(CursorError::ExtensionWithoutSeparator {
                extension: ext.to_string(),
            });
        }

        Ok(Self {
            segments,
            extension: extension.map(str::to_string),
            path_separator,
            extension_separator,
            position: 0,
            extension_to_segment: false,
        })
    }

    /// Returns `true` when [`advance`](Self::advance) can be called.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.segments.len()
    }

    /// Returns `true` when [`retreat`](Self::retreat) can be called.
    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// The segment at the current position, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoNext`] when the cursor is at the end.
    pub fn peek_next(&self) -> Result<Cow<'_, str>, CursorError> {
        self.ensure_next()?;
        Ok(self.segment_view(self.position))
    }

    /// The segment at the current position, then move forward by one.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoNext`] when the cursor is at the end.
    pub fn advance(&mut self) -> Result<Cow<'_, str>, CursorError> {
        self.ensure_next()?;
        self.position += 1;
        Ok(self.segment_view(self.position - 1))
    }

    /// The segment before the current position, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoPrevious`] when the cursor is at the beginning.
    pub fn peek_previous(&self) -> Result<Cow<'_, str>, CursorError> {
        if !self.has_previous() {
            return Err(CursorError::NoPrevious);
        }
        Ok(self.segment_view(self.position - 1))
    }

    /// The segment before the current position, then move backward by one.
    ///
    /// # Errors
    ///
    /// [`CursorError::NoPrevious`] when the cursor is at the beginning.
    pub fn retreat(&mut self) -> Result<Cow<'_, str>, CursorError> {
        if !self.has_previous() {
            return Err(CursorError::NoPrevious);
        }
        self.position -= 1;
        Ok(self.segment_view(self.position))
    }

    /// Move forward by one segment without reading it.
    ///
    /// Returns `false` (and does nothing) when the cursor is already at the end.
    pub fn skip_next(&mut self) -> bool {
        if self.has_next() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Textual forms of the segments from the current position to the end.
    ///
    /// Does not move the cursor.
    pub fn remaining(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (self.position..self.segments.len()).map(move |index| self.segment_view(index))
    }

    /// Jump to the first segment.
    pub fn beginning(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    /// Jump past the last segment; `has_next()` is `false` afterwards.
    pub fn end(&mut self) -> &mut Self {
        self.position = self.segments.len();
        self
    }

    /// Save the current position and view toggle.
    #[must_use]
    pub fn mark(&self) -> CursorMark {
        CursorMark {
            position: self.position,
            extension_to_segment: self.extension_to_segment,
        }
    }

    /// Restore a state saved with [`mark`](Self::mark).
    pub fn reset(&mut self, mark: CursorMark) {
        self.position = mark.position.min(self.segments.len());
        self.extension_to_segment = mark.extension_to_segment;
    }

    /// Zero-based index of the current segment, in `[0, len]`.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of segments.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when the path has no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The stored segments, with the extension stripped from the last one.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The extracted extension, or `None` when absent or folded back into the
    /// last segment by [`set_extension_to_segment`](Self::set_extension_to_segment).
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        if self.extension_to_segment {
            None
        } else {
            self.extension.as_deref()
        }
    }

    /// Configured path separator.
    #[must_use]
    pub fn path_separator(&self) -> Option<&str> {
        self.path_separator.as_deref()
    }

    /// Configured extension separator.
    #[must_use]
    pub fn extension_separator(&self) -> Option<&str> {
        self.extension_separator.as_deref()
    }

    /// Whether the extension is currently presented as part of the last segment.
    #[must_use]
    pub fn is_extension_to_segment(&self) -> bool {
        self.extension_to_segment
    }

    /// Present the extracted extension as part of the last segment (`true`) or
    /// as a separate extension (`false`, the default).
    ///
    /// This lets a caller decide per request that e.g. `data.json` names a
    /// resource rather than `data` in JSON format, without re-parsing. The
    /// stored segments and extension are not modified.
    pub fn set_extension_to_segment(&mut self, extension_to_segment: bool) {
        self.extension_to_segment = extension_to_segment;
    }

    /// Path from the first segment up to, but excluding, the current one.
    #[must_use]
    pub fn previous_path(&self) -> String {
        self.compose(0, self.position)
    }

    /// Path after the current segment until the end.
    #[must_use]
    pub fn following_path(&self) -> String {
        self.compose(self.position + 1, self.segments.len())
    }

    /// Path from the first segment up to and including the current one.
    #[must_use]
    pub fn path_to_current(&self) -> String {
        self.compose(0, self.position + 1)
    }

    /// Path from the current segment (included) until the end.
    #[must_use]
    pub fn path_from_current(&self) -> String {
        self.compose(self.position, self.segments.len())
    }

    /// Concatenate `suffix` onto this path into a new cursor.
    ///
    /// The extension of `self` is discarded; the result takes the extension and
    /// extension separator of `suffix` and is positioned at `self.len()`, i.e.
    /// at the junction of the two paths. Neither input is modified.
    ///
    /// # Errors
    ///
    /// [`CursorError::IncompatibleSeparator`] when the path separators differ,
    /// or a construction error when the combined parts are not representable
    /// (two segments without a path separator).
    pub fn append(&self, suffix: &PathCursor) -> Result<PathCursor, CursorError> {
        if self.path_separator != suffix.path_separator {
            return Err(CursorError::IncompatibleSeparator {
                left: self.path_separator.clone(),
                right: suffix.path_separator.clone(),
            });
        }

        let mut result = PathCursor::from_parts(
            self.segments.iter().chain(suffix.segments.iter()).cloned(),
            suffix.extension.as_deref(),
            suffix.path_separator.as_deref(),
            suffix.extension_separator.as_deref(),
        )?;
        result.position = self.segments.len();
        Ok(result)
    }

    fn ensure_next(&self) -> Result<(), CursorError> {
        if self.has_next() {
            Ok(())
        } else {
            Err(CursorError::NoNext {
                position: self.position,
                len: self.segments.len(),
            })
        }
    }

    /// Textual form of the segment at `index`, honouring the view toggle.
    fn segment_view(&self, index: usize) -> Cow<'_, str> {
        let segment = self.segments[index].as_str();
        if index + 1 == self.segments.len() && self.extension_to_segment {
            if let (Some(sep), Some(ext)) = (&self.extension_separator, &self.extension) {
                let mut joined = String::with_capacity(segment.len() + sep.len() + ext.len());
                joined.push_str(segment);
                joined.push_str(sep);
                joined.push_str(ext);
                return Cow::Owned(joined);
            }
        }
        Cow::Borrowed(segment)
    }

    fn compose(&self, from: usize, to: usize) -> String {
        let len = self.segments.len();
        let to = to.min(len);
        if from >= to {
            return String::new();
        }

        let mut out = String::new();
        for index in from..to {
            if let Some(sep) = &self.path_separator {
                out.push_str(sep);
            }
            out.push_str(&self.segment_view(index));
        }

        // With the toggle on, segment_view has already re-attached the extension.
        if to == len && !self.extension_to_segment {
            if let (Some(sep), Some(ext)) = (&self.extension_separator, &self.extension) {
                out.push_str(sep);
                out.push_str(ext);
            }
        }
        out
    }
}

impl fmt::Display for PathCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose(0, self.segments.len()))
    }
}

impl From<&str> for PathCursor {
    fn from(path: &str) -> Self {
        PathCursor::new(path)
    }
}
