/*
 * Responsibility
 * - Materialize a flat comment collection (parent references) into an
 *   ordered forest of threads
 * - Pure: no store access, so the shaping rules are testable on their own
 *
 * Rules:
 * - Input must already be ordered by creation time ascending; sibling order
 *   at every level of the output is input order.
 * - A comment whose parent id is not present in the input (parent deleted,
 *   or outside the filtered set) is promoted to a root, never dropped.
 * - Depth is unbounded.
 */
use std::collections::{HashMap, HashSet};

/// One node of the forest: a comment plus its direct replies, recursively.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread<T> {
    pub comment: T,
    pub replies: Vec<CommentThread<T>>,
}

/// Build the forest from comments ordered by creation time ascending.
///
/// Generic over the comment type; `id_of` / `parent_of` expose the thread
/// structure so repo rows and test fixtures can both go through here.
pub fn build_forest<T, I, P>(comments: Vec<T>, id_of: I, parent_of: P) -> Vec<CommentThread<T>>
where
    I: Fn(&T) -> i64,
    P: Fn(&T) -> Option<i64>,
{
    // Pass 1: which ids exist in this batch. A parent reference outside this
    // set is dangling and the comment becomes a root.
    let present: HashSet<i64> = comments.iter().map(&id_of).collect();

    // Pass 2, in input order: bucket each comment under its resolvable
    // parent; everything else keeps its position among the roots.
    let mut children: HashMap<i64, Vec<T>> = HashMap::new();
    let mut roots: Vec<T> = Vec::new();

    for comment in comments {
        match parent_of(&comment) {
            Some(parent_id) if present.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(comment);
            }
            _ => roots.push(comment),
        }
    }

    attach(roots, &mut children, &id_of)
}

fn attach<T, I>(nodes: Vec<T>, children: &mut HashMap<i64, Vec<T>>, id_of: &I) -> Vec<CommentThread<T>>
where
    I: Fn(&T) -> i64,
{
    nodes
        .into_iter()
        .map(|comment| {
            let replies = children
                .remove(&id_of(&comment))
                .map(|kids| attach(kids, children, id_of))
                .unwrap_or_default();
            CommentThread { comment, replies }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // (id, parent) stands in for a comment row; vector order is creation
    // order, same as the repo's ORDER BY "createdAt" ASC.
    type Rec = (i64, Option<i64>);

    fn forest(input: Vec<Rec>) -> Vec<CommentThread<Rec>> {
        build_forest(input, |c| c.0, |c| c.1)
    }

    fn count_nodes(threads: &[CommentThread<Rec>]) -> usize {
        threads
            .iter()
            .map(|t| 1 + count_nodes(&t.replies))
            .sum()
    }

    #[test]
    fn nests_replies_under_their_parents() {
        let out = forest(vec![(1, None), (2, Some(1)), (3, Some(1)), (4, Some(2))]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].comment.0, 1);
        assert_eq!(out[0].replies.len(), 2);
        assert_eq!(out[0].replies[0].comment.0, 2);
        assert_eq!(out[0].replies[0].replies[0].comment.0, 4);
        assert_eq!(out[0].replies[1].comment.0, 3);
        assert!(out[0].replies[1].replies.is_empty());
    }

    #[test]
    fn every_comment_appears_exactly_once() {
        let input = vec![
            (1, None),
            (2, Some(1)),
            (3, None),
            (4, Some(2)),
            (5, Some(99)), // dangling
            (6, Some(3)),
        ];
        let out = forest(input.clone());
        assert_eq!(count_nodes(&out), input.len());
    }

    #[test]
    fn siblings_keep_creation_order_at_every_level() {
        let out = forest(vec![
            (1, None),
            (2, None),
            (3, Some(1)),
            (4, Some(1)),
            (5, Some(1)),
        ]);

        let root_ids: Vec<i64> = out.iter().map(|t| t.comment.0).collect();
        assert_eq!(root_ids, vec![1, 2]);

        let reply_ids: Vec<i64> = out[0].replies.iter().map(|t| t.comment.0).collect();
        assert_eq!(reply_ids, vec![3, 4, 5]);
    }

    #[test]
    fn orphan_is_promoted_to_root_in_creation_order() {
        // A (1) was deleted together with its direct child B (2); the
        // grandchild C (3) keeps its dangling parent reference and must
        // surface as a root between the remaining top-level comments.
        let out = forest(vec![(10, None), (3, Some(2)), (11, None)]);

        let root_ids: Vec<i64> = out.iter().map(|t| t.comment.0).collect();
        assert_eq!(root_ids, vec![10, 3, 11]);
        assert!(out[1].replies.is_empty());
    }

    #[test]
    fn handles_deep_reply_chains() {
        let mut input: Vec<Rec> = vec![(0, None)];
        for id in 1..=500 {
            input.push((id, Some(id - 1)));
        }

        let out = forest(input);
        assert_eq!(out.len(), 1);

        let mut depth = 0;
        let mut node = &out[0];
        while let Some(next) = node.replies.first() {
            depth += 1;
            node = next;
        }
        assert_eq!(depth, 500);
    }

    #[test]
    fn rebuilding_from_the_same_input_is_identical() {
        let input = vec![(1, None), (2, Some(1)), (3, Some(7)), (4, None)];
        assert_eq!(forest(input.clone()), forest(input));
    }
}
