use std::fs;

use bit_set::BitSet;
use nom::IResult;
use nom::bytes::complete::tag;
use nom::branch::alt;
use nom::character::complete::{digit1, space1, space0, line_ending, not_line_ending};
use nom::combinator::{map_res, opt};
use nom::sequence::{preceded, separated_pair, terminated};

use crate::color::VertexId;
use crate::error::ColoringError;
use crate::graph::Graph;


impl Graph {
    /// creates a graph from a DIMACS file
    pub fn from_dimacs_file(filename:&str) -> Result<Self, ColoringError> {
        let (n, edges) = read_from_file(filename)?;
        Self::new(n, &edges)
    }
}


/// reads an instance from file, returns (n, edges) with 0-based vertices
pub fn read_from_file(filename:&str) -> Result<(usize, Vec<(VertexId,VertexId)>), ColoringError> {
    let content = fs::read_to_string(filename)?;
    read_from_str(&content)
}

/**
reads a DIMACS instance, returns (n, edges) with 0-based vertices.
Edges given twice (in any orientation) are only kept once. The header may count
either the edge lines or the distinct edges.
*/
pub fn read_from_str(content:&str) -> Result<(usize, Vec<(VertexId,VertexId)>), ColoringError> {
    let s1 = content.replace('\r', "");
    let (s2, _) = skip_comments(&s1).map_err(to_parse_error)?;
    let (mut s3, (n, m)) = read_header(s2).map_err(to_parse_error)?;
    // seen[u]: v such that (u,v) was already read (u < v), grown as edges are read
    let mut seen:Vec<BitSet> = Vec::new();
    let mut edges = Vec::new();
    let mut check_nb_edges = 0;
    loop {
        let (remaining, _) = skip_comments(s3).map_err(to_parse_error)?;
        s3 = remaining;
        if s3.trim().is_empty() { break; }
        let (remaining, (a,b)) = read_edge(s3).map_err(to_parse_error)?;
        s3 = remaining;
        if a == 0 || b == 0 || a > n || b > n {
            return Err(ColoringError::VertexOutOfRange { u:a, v:b, n });
        }
        check_nb_edges += 1;
        let (u,v) = (a.min(b)-1, a.max(b)-1);
        if seen.len() <= u {
            seen.resize(u+1, BitSet::new());
        }
        if !seen[u].contains(v) {
            seen[u].insert(v);
            edges.push((u,v));
        }
    }
    let nb_edges = edges.len();
    if m != check_nb_edges && Some(m) != check_nb_edges.checked_mul(2) && m != nb_edges {
        return Err(ColoringError::Parse(format!(
            "header announces {} edges, {} found", m, check_nb_edges
        )));
    }
    Ok((n, edges))
}

fn to_parse_error(e:nom::Err<nom::error::Error<&str>>) -> ColoringError {
    ColoringError::Parse(format!("{:?}", e))
}

/// skips a single comment (the last line of a file may have no end of line)
fn skip_comment(s:&str) -> IResult<&str, &str> {
    terminated(preceded(tag("c"), not_line_ending), opt(line_ending))(s)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    nom::multi::many0(skip_comment)(s)
}

fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by a space, and the end of line if any
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(
        separated_pair(integer, space1, integer),
        preceded(space0, opt(line_ending))
    )(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(alt((tag("p edge "), tag("p col "))), read_two_integers)(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(terminated(tag("e"), space1), read_two_integers)(s)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let s = "c grid 2x2\np edge 4 4\ne 1 2\ne 1 3\ne 2 4\ne 3 4\n";
        let (n, edges) = read_from_str(s).unwrap();
        assert_eq!(n, 4);
        assert_eq!(edges, vec![(0,1), (0,2), (1,3), (2,3)]);
        let g = Graph::new(n, &edges).unwrap();
        assert_eq!(g.neighbors(0), &[1,2]);
    }

    #[test]
    fn test_read_comment1() {
        let s = "c this is a test comment\np edge 2 1\ne 1 2";
        assert_eq!(
            skip_comments(s),
            Ok((
                "p edge 2 1\ne 1 2",
                vec![" this is a test comment"]
            ))
        );
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_header_col() {
        let s = "p col 2 1\ne 1 2";
        assert_eq!(read_header(s).unwrap().0, "e 1 2");
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2\n";
        assert_eq!(read_edge(s).unwrap().1, (1,2));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_edges_listed_twice() {
        let s = "p edge 3 4\ne 1 2\ne 2 1\ne 2 3\ne 3 2\n";
        let (n, edges) = read_from_str(s).unwrap();
        assert_eq!(n, 3);
        assert_eq!(edges, vec![(0,1), (1,2)]);
    }

    #[test]
    fn test_header_counts_distinct_edges() {
        let s = "p edge 2 1\ne 1 2\ne 2 1\n";
        assert_eq!(read_from_str(s).unwrap(), (2, vec![(0,1)]));
    }

    #[test]
    fn test_comment_on_last_line() {
        let s = "p edge 2 1\ne 1 2\nc end";
        assert_eq!(read_from_str(s).unwrap(), (2, vec![(0,1)]));
        let s = "c only a header and a comment\np edge 3 0\nc";
        assert_eq!(read_from_str(s).unwrap(), (3, vec![]));
    }

    #[test]
    fn test_huge_header_values() {
        let s = "p edge 2 18446744073709551615\ne 1 2\n";
        assert!(matches!(read_from_str(s), Err(ColoringError::Parse(_))));
        let (n, edges) = read_from_str("p edge 18446744073709551615 1\ne 1 2\n").unwrap();
        assert_eq!(n, usize::MAX);
        assert_eq!(edges, vec![(0,1)]);
    }

    #[test]
    fn test_crlf_and_trailing_spaces() {
        let s = "c windows file\r\np col 2 1 \r\ne 1 2\r\n";
        assert_eq!(read_from_str(s).unwrap(), (2, vec![(0,1)]));
    }

    #[test]
    fn test_invalid_vertex() {
        let s = "p edge 2 1\ne 1 3\n";
        assert!(matches!(read_from_str(s), Err(ColoringError::VertexOutOfRange { .. })));
    }

    #[test]
    fn test_wrong_edge_count() {
        let s = "p edge 3 3\ne 1 2\n";
        assert!(matches!(read_from_str(s), Err(ColoringError::Parse(_))));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(read_from_str("e 1 2\n"), Err(ColoringError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Graph::from_dimacs_file("does/not/exist.col"),
            Err(ColoringError::Io(_))
        ));
    }
}
