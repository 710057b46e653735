//! General-graph maximum-weight matching behind a small trait.
//!
//! Swiss pairing only needs the contract: given vertices `0..n` and weighted edges,
//! return each vertex's mate so that as many vertices as possible are matched and,
//! among those matchings, total weight is maximal. Any correct solver can be plugged
//! in through [`Matcher`]; [`BlossomMatcher`] is the default.

use std::collections::BTreeMap;

/// Undirected edge `u - v` with weight `weight` (higher is better).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeightedEdge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

impl WeightedEdge {
    pub fn new(u: usize, v: usize, weight: i64) -> Self {
        Self { u, v, weight }
    }
}

#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum MatchingError {
    #[error("edge {u}-{v} refers to a vertex outside 0..{vertices}")]
    VertexOutOfRange { u: usize, v: usize, vertices: usize },
}

pub trait Matcher {
    /// Mate of every vertex, or `None` for vertices left unmatched.
    fn solve(&self, vertices: usize, edges: &[WeightedEdge]) -> Result<Vec<Option<usize>>, MatchingError>;
}

/// Edmonds' blossom algorithm with primal-dual weight updates, O(n^3).
///
/// Always maximum cardinality; weights decide between matchings of equal size.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlossomMatcher;

impl Matcher for BlossomMatcher {
    fn solve(&self, vertices: usize, edges: &[WeightedEdge]) -> Result<Vec<Option<usize>>, MatchingError> {
        // Keep the heaviest of any parallel edges, in a stable order.
        let mut weights: BTreeMap<(usize, usize), i64> = BTreeMap::new();
        for e in edges {
            if e.u >= vertices || e.v >= vertices {
                return Err(MatchingError::VertexOutOfRange { u: e.u, v: e.v, vertices });
            }
            if e.u == e.v {
                continue;
            }
            let w = weights.entry((e.u.min(e.v), e.u.max(e.v))).or_insert(e.weight);
            *w = (*w).max(e.weight);
        }
        let Some(&lightest) = weights.values().min() else {
            return Ok(vec![None; vertices]);
        };
        // Every maximum-cardinality matching has the same size, so a uniform shift
        // keeps their order while making all weights positive.
        let shifted: Vec<(usize, usize, i128)> = weights
            .into_iter()
            .map(|((u, v), w)| (u, v, i128::from(w) - i128::from(lightest) + 1))
            .collect();

        let mut state = Blossom::new(vertices, &shifted);
        state.run();
        Ok(state.mates())
    }
}

const NONE: usize = usize::MAX;

const FREE: u8 = 0;
const OUTER: u8 = 1;
const INNER: u8 = 2;
const CRUMB: u8 = 5;

/// How a dual update unblocks the search.
enum Step {
    /// Least-slack edge from an outer vertex to a free one.
    Grow(usize),
    /// Least-slack edge between two outer blossoms.
    Join(usize),
    /// Inner blossom whose dual reached zero.
    Expand(usize),
}

/// Working state. Vertices are `0..n`, non-trivial blossoms `n..2n`. Edge `k` has
/// endpoints `2k` and `2k + 1`; duals are stored doubled so they stay integral.
struct Blossom<'a> {
    n: usize,
    edges: &'a [(usize, usize, i128)],
    endpoint: Vec<usize>,
    /// Remote endpoints of the edges at each vertex.
    neighbours: Vec<Vec<usize>>,
    /// Remote endpoint of the matched edge.
    mate: Vec<usize>,
    label: Vec<u8>,
    label_end: Vec<usize>,
    in_blossom: Vec<usize>,
    parent: Vec<usize>,
    children: Vec<Vec<usize>>,
    base: Vec<usize>,
    /// Endpoints joining consecutive children around the blossom cycle.
    child_endpoints: Vec<Vec<usize>>,
    best_edge: Vec<usize>,
    blossom_best_edges: Vec<Option<Vec<usize>>>,
    unused: Vec<usize>,
    dual: Vec<i128>,
    allowed: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> Blossom<'a> {
    fn new(n: usize, edges: &'a [(usize, usize, i128)]) -> Self {
        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbours = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbours[i].push(2 * k + 1);
            neighbours[j].push(2 * k);
        }
        let heaviest = edges.iter().map(|e| e.2).max().unwrap_or(0);
        Self {
            n,
            edges,
            endpoint,
            neighbours,
            mate: vec![NONE; n],
            label: vec![FREE; 2 * n],
            label_end: vec![NONE; 2 * n],
            in_blossom: (0..n).collect(),
            parent: vec![NONE; 2 * n],
            children: vec![Vec::new(); 2 * n],
            base: (0..n).chain(std::iter::repeat(NONE).take(n)).collect(),
            child_endpoints: vec![Vec::new(); 2 * n],
            best_edge: vec![NONE; 2 * n],
            blossom_best_edges: vec![None; 2 * n],
            unused: (n..2 * n).collect(),
            dual: std::iter::repeat(heaviest)
                .take(n)
                .chain(std::iter::repeat(0).take(n))
                .collect(),
            allowed: vec![false; edges.len()],
            queue: Vec::new(),
        }
    }

    fn slack(&self, k: usize) -> i128 {
        let (i, j, w) = self.edges[k];
        self.dual[i] + self.dual[j] - 2 * w
    }

    fn leaves(&self, b: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(b, &mut out);
        out
    }

    fn collect_leaves(&self, b: usize, out: &mut Vec<usize>) {
        if b < self.n {
            out.push(b);
        } else {
            for &t in &self.children[b] {
                self.collect_leaves(t, out);
            }
        }
    }

    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.in_blossom[w];
        self.label[w] = t;
        self.label[b] = t;
        self.label_end[w] = p;
        self.label_end[b] = p;
        self.best_edge[w] = NONE;
        self.best_edge[b] = NONE;
        if t == OUTER {
            let leaves = self.leaves(b);
            self.queue.extend(leaves);
        } else if t == INNER {
            // The base of an inner blossom is always matched.
            let m = self.mate[self.base[b]];
            self.assign_label(self.endpoint[m], OUTER, m ^ 1);
        }
    }

    /// Walk back from `v` and `w` along the alternating tree. Returns the base of the
    /// new blossom, or `NONE` if the paths end at different roots.
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> usize {
        let mut path = Vec::new();
        let mut found = NONE;
        while v != NONE {
            let mut b = self.in_blossom[v];
            if self.label[b] & 4 != 0 {
                found = self.base[b];
                break;
            }
            path.push(b);
            self.label[b] = CRUMB;
            if self.label_end[b] == NONE {
                v = NONE;
            } else {
                v = self.endpoint[self.label_end[b]];
                b = self.in_blossom[v];
                v = self.endpoint[self.label_end[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = OUTER;
        }
        found
    }

    fn add_blossom(&mut self, base: usize, k: usize) {
        let (v, w, _) = self.edges[k];
        let bb = self.in_blossom[base];
        let mut bv = self.in_blossom[v];
        let mut bw = self.in_blossom[w];
        // There are n slots and at most n / 2 live blossoms.
        let Some(b) = self.unused.pop() else {
            return;
        };
        self.base[b] = base;
        self.parent[b] = NONE;
        self.parent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.parent[bv] = b;
            path.push(bv);
            endps.push(self.label_end[bv]);
            bv = self.in_blossom[self.endpoint[self.label_end[bv]]];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.parent[bw] = b;
            path.push(bw);
            endps.push(self.label_end[bw] ^ 1);
            bw = self.in_blossom[self.endpoint[self.label_end[bw]]];
        }

        self.label[b] = OUTER;
        self.label_end[b] = self.label_end[bb];
        self.dual[b] = 0;
        self.children[b] = path.clone();
        self.child_endpoints[b] = endps;
        for v in self.leaves(b) {
            if self.label[self.in_blossom[v]] == INNER {
                self.queue.push(v);
            }
            self.in_blossom[v] = b;
        }

        let mut best_to = vec![NONE; 2 * self.n];
        for &sub in &path {
            let lists: Vec<Vec<usize>> = match self.blossom_best_edges[sub].take() {
                Some(list) => vec![list],
                None => self
                    .leaves(sub)
                    .into_iter()
                    .map(|v| self.neighbours[v].iter().map(|p| p / 2).collect())
                    .collect(),
            };
            for k in lists.into_iter().flatten() {
                let (i, j, _) = self.edges[k];
                let far = if self.in_blossom[j] == b { i } else { j };
                let bj = self.in_blossom[far];
                if bj != b
                    && self.label[bj] == OUTER
                    && (best_to[bj] == NONE || self.slack(k) < self.slack(best_to[bj]))
                {
                    best_to[bj] = k;
                }
            }
            self.best_edge[sub] = NONE;
        }
        let best: Vec<usize> = best_to.into_iter().filter(|&k| k != NONE).collect();
        self.best_edge[b] = NONE;
        for &k in &best {
            if self.best_edge[b] == NONE || self.slack(k) < self.slack(self.best_edge[b]) {
                self.best_edge[b] = k;
            }
        }
        self.blossom_best_edges[b] = Some(best);
    }

    fn expand_blossom(&mut self, b: usize, end_stage: bool) {
        let children = self.children[b].clone();
        for &s in &children {
            self.parent[s] = NONE;
            if s < self.n {
                self.in_blossom[s] = s;
            } else if end_stage && self.dual[s] == 0 {
                self.expand_blossom(s, end_stage);
            } else {
                for v in self.leaves(s) {
                    self.in_blossom[v] = s;
                }
            }
        }

        // Mid-stage expansion of an inner blossom: relabel the children along the
        // even-length path from the entry child to the base.
        if !end_stage && self.label[b] == INNER {
            let endps = self.child_endpoints[b].clone();
            let len = children.len() as isize;
            let at = |j: isize| j.rem_euclid(len) as usize;
            let entry = self.in_blossom[self.endpoint[self.label_end[b] ^ 1]];
            let mut j = children.iter().position(|&c| c == entry).unwrap_or(0) as isize;
            let (step, trick): (isize, usize) = if j & 1 == 1 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let mut p = self.label_end[b];
            while j != 0 {
                self.label[self.endpoint[p ^ 1]] = FREE;
                let q = endps[at(j - trick as isize)];
                self.label[self.endpoint[q ^ trick ^ 1]] = FREE;
                self.assign_label(self.endpoint[p ^ 1], INNER, p);
                self.allowed[q / 2] = true;
                j += step;
                p = endps[at(j - trick as isize)] ^ trick;
                self.allowed[p / 2] = true;
                j += step;
            }
            let bv = children[at(j)];
            let ep = self.endpoint[p ^ 1];
            self.label[ep] = INNER;
            self.label[bv] = INNER;
            self.label_end[ep] = p;
            self.label_end[bv] = p;
            self.best_edge[bv] = NONE;
            j += step;
            while children[at(j)] != entry {
                let bv = children[at(j)];
                if self.label[bv] == OUTER {
                    j += step;
                    continue;
                }
                if let Some(v) = self.leaves(bv).into_iter().find(|&v| self.label[v] != FREE) {
                    self.label[v] = FREE;
                    self.label[self.endpoint[self.mate[self.base[bv]]]] = FREE;
                    self.assign_label(v, INNER, self.label_end[v]);
                }
                j += step;
            }
        }

        self.label[b] = FREE;
        self.label_end[b] = NONE;
        self.children[b].clear();
        self.child_endpoints[b].clear();
        self.base[b] = NONE;
        self.blossom_best_edges[b] = None;
        self.best_edge[b] = NONE;
        self.unused.push(b);
    }

    /// Swap matched and unmatched edges inside `b` so that `v` becomes its base.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.parent[t] != b {
            t = self.parent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }
        let children = self.children[b].clone();
        let endps = self.child_endpoints[b].clone();
        let len = children.len() as isize;
        let at = |j: isize| j.rem_euclid(len) as usize;
        let i = children.iter().position(|&c| c == t).unwrap_or(0);
        let mut j = i as isize;
        let (step, trick): (isize, usize) = if i & 1 == 1 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        while j != 0 {
            j += step;
            let t = children[at(j)];
            let p = endps[at(j - trick as isize)] ^ trick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += step;
            let t = children[at(j)];
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }
        self.children[b].rotate_left(i);
        self.child_endpoints[b].rotate_left(i);
        self.base[b] = self.base[self.children[b][0]];
    }

    /// Flip the augmenting path through edge `k` back to both roots.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            loop {
                let bs = self.in_blossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.label_end[bs] == NONE {
                    break;
                }
                let t = self.endpoint[self.label_end[bs]];
                let bt = self.in_blossom[t];
                s = self.endpoint[self.label_end[bt]];
                let j = self.endpoint[self.label_end[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.label_end[bt];
                p = self.label_end[bt] ^ 1;
            }
        }
    }

    /// Label outward from outer vertex `v`. Returns true if the matching grew.
    fn scan(&mut self, v: usize) -> bool {
        for idx in 0..self.neighbours[v].len() {
            let p = self.neighbours[v][idx];
            let k = p / 2;
            let w = self.endpoint[p];
            if self.in_blossom[v] == self.in_blossom[w] {
                continue;
            }
            let mut kslack = 0;
            if !self.allowed[k] {
                kslack = self.slack(k);
                if kslack <= 0 {
                    self.allowed[k] = true;
                }
            }
            let bw = self.in_blossom[w];
            if self.allowed[k] {
                if self.label[bw] == FREE {
                    self.assign_label(w, INNER, p ^ 1);
                } else if self.label[bw] == OUTER {
                    let base = self.scan_blossom(v, w);
                    if base != NONE {
                        self.add_blossom(base, k);
                    } else {
                        self.augment_matching(k);
                        return true;
                    }
                } else if self.label[w] == FREE {
                    // Inside an inner blossom: remember how w was reached.
                    self.label[w] = INNER;
                    self.label_end[w] = p ^ 1;
                }
            } else if self.label[bw] == OUTER {
                let b = self.in_blossom[v];
                if self.best_edge[b] == NONE || kslack < self.slack(self.best_edge[b]) {
                    self.best_edge[b] = k;
                }
            } else if self.label[w] == FREE
                && (self.best_edge[w] == NONE || kslack < self.slack(self.best_edge[w]))
            {
                self.best_edge[w] = k;
            }
        }
        false
    }

    /// Smallest dual change that opens a new edge or dissolves an inner blossom.
    fn next_step(&self) -> Option<(i128, Step)> {
        let mut best: Option<(i128, Step)> = None;
        let offer = |d: i128, step: Step, best: &mut Option<(i128, Step)>| {
            if best.as_ref().map_or(true, |(bd, _)| d < *bd) {
                *best = Some((d, step));
            }
        };
        for v in 0..self.n {
            if self.label[self.in_blossom[v]] == FREE && self.best_edge[v] != NONE {
                offer(self.slack(self.best_edge[v]), Step::Grow(self.best_edge[v]), &mut best);
            }
        }
        for b in 0..2 * self.n {
            if self.parent[b] == NONE && self.label[b] == OUTER && self.best_edge[b] != NONE {
                offer(self.slack(self.best_edge[b]) / 2, Step::Join(self.best_edge[b]), &mut best);
            }
        }
        for b in self.n..2 * self.n {
            if self.base[b] != NONE && self.parent[b] == NONE && self.label[b] == INNER {
                offer(self.dual[b], Step::Expand(b), &mut best);
            }
        }
        best
    }

    fn run(&mut self) {
        for _ in 0..self.n {
            self.label.fill(FREE);
            self.best_edge.fill(NONE);
            for list in &mut self.blossom_best_edges[self.n..] {
                *list = None;
            }
            self.allowed.fill(false);
            self.queue.clear();
            for v in 0..self.n {
                if self.mate[v] == NONE && self.label[self.in_blossom[v]] == FREE {
                    self.assign_label(v, OUTER, NONE);
                }
            }

            let mut augmented = false;
            loop {
                while let Some(v) = self.queue.pop() {
                    if self.scan(v) {
                        augmented = true;
                        break;
                    }
                }
                if augmented {
                    break;
                }
                // No move left: the matching already has maximum cardinality.
                let Some((delta, step)) = self.next_step() else {
                    break;
                };
                for v in 0..self.n {
                    match self.label[self.in_blossom[v]] {
                        OUTER => self.dual[v] -= delta,
                        INNER => self.dual[v] += delta,
                        _ => {}
                    }
                }
                for b in self.n..2 * self.n {
                    if self.base[b] != NONE && self.parent[b] == NONE {
                        match self.label[b] {
                            OUTER => self.dual[b] += delta,
                            INNER => self.dual[b] -= delta,
                            _ => {}
                        }
                    }
                }
                match step {
                    Step::Grow(k) => {
                        self.allowed[k] = true;
                        let (i, j, _) = self.edges[k];
                        let outer = if self.label[self.in_blossom[i]] == FREE { j } else { i };
                        self.queue.push(outer);
                    }
                    Step::Join(k) => {
                        self.allowed[k] = true;
                        self.queue.push(self.edges[k].0);
                    }
                    Step::Expand(b) => self.expand_blossom(b, false),
                }
            }
            if !augmented {
                break;
            }
            for b in self.n..2 * self.n {
                if self.parent[b] == NONE && self.base[b] != NONE && self.label[b] == OUTER && self.dual[b] == 0 {
                    self.expand_blossom(b, true);
                }
            }
        }
    }

    fn mates(&self) -> Vec<Option<usize>> {
        self.mate
            .iter()
            .map(|&p| (p != NONE).then(|| self.endpoint[p]))
            .collect()
    }
}
