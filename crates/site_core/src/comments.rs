//! Comment board with one-shot upvoting. Comments are page-lifetime state,
//! newest first, exactly as the reference site kept them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub votes: u32,
    voted: bool,
}

impl Comment {
    pub fn has_vote_from_visitor(&self) -> bool {
        self.voted
    }
}

#[derive(Debug, Default)]
pub struct CommentBoard {
    comments: Vec<Comment>,
}

impl CommentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: impl IntoIterator<Item = (String, String, u32)>) -> Self {
        let comments = seed
            .into_iter()
            .map(|(author, body, votes)| Comment {
                author,
                body,
                votes,
                voted: false,
            })
            .collect();
        Self { comments }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Prepend a visitor comment; blank input is dropped. Returns the index
    /// of the new comment (always 0: newest first).
    pub fn submit(&mut self, body: &str) -> Option<usize> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        self.comments.insert(
            0,
            Comment {
                author: "Anonymous User".to_string(),
                body: body.to_string(),
                votes: 0,
                voted: false,
            },
        );
        Some(0)
    }

    /// Upvote the comment at `index`, once per visitor. Returns the new vote
    /// count, or `None` when the index is unknown or the vote was already
    /// cast.
    pub fn upvote(&mut self, index: usize) -> Option<u32> {
        let comment = self.comments.get_mut(index)?;
        if comment.voted {
            return None;
        }
        comment.voted = true;
        comment.votes += 1;
        Some(comment.votes)
    }
}
