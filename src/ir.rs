use std::collections::BTreeMap;

/// Which layout family a graph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    /// Activity/trigger flow diagram, laid out in discrete levels.
    Flow,
    /// Cross-context dependency graph, laid out by force simulation.
    Dependency,
}

impl GraphKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "flow" => Some(Self::Flow),
            "dependency" | "deps" => Some(Self::Dependency),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    End,
    Action,
    Decision,
    Connector,
    Event,
    Error,
    /// Context node in a dependency graph; carries size counts.
    Context,
}

impl NodeKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "action" => Some(Self::Action),
            "decision" => Some(Self::Decision),
            "connector" => Some(Self::Connector),
            "event" => Some(Self::Event),
            "error" => Some(Self::Error),
            "context" => Some(Self::Context),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Connector/category association shown alongside the label.
    pub connector: Option<String>,
    /// Size counts for context nodes; all zero for flow nodes.
    pub files: u32,
    pub ideas: u32,
    pub apis: u32,
}

impl Node {
    /// Combined size metric driving the rendered radius of a context node.
    pub fn size_metric(&self) -> u32 {
        self.files + self.ideas + self.apis
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVariant {
    Default,
    Yes,
    No,
    Error,
}

impl EdgeVariant {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "default" | "" => Some(Self::Default),
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub variant: EdgeVariant,
    /// Relationship weight; pulls dependency nodes closer when larger.
    pub weight: f32,
}

/// Input graph. Nodes live in a BTreeMap keyed by id; `node_order`
/// records insertion order, which the BFS layering depends on.
#[derive(Debug, Clone)]
pub struct Graph {
    pub kind: GraphKind,
    pub nodes: BTreeMap<String, Node>,
    pub node_order: BTreeMap<String, usize>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: BTreeMap::new(),
            node_order: BTreeMap::new(),
            edges: Vec::new(),
        }
    }

    /// Insert or update a node. A later definition overrides label and
    /// kind but keeps the original insertion position.
    pub fn ensure_node(&mut self, id: &str, label: Option<String>, kind: Option<NodeKind>) {
        let next_order = self.node_order.len();
        self.node_order.entry(id.to_string()).or_insert(next_order);
        let entry = self.nodes.entry(id.to_string()).or_insert(Node {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Action,
            connector: None,
            files: 0,
            ideas: 0,
            apis: 0,
        });
        if let Some(label) = label {
            entry.label = label;
        }
        if let Some(kind) = kind {
            entry.kind = kind;
        }
    }

    /// Node ids sorted by insertion order.
    pub fn ordered_node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort_by_key(|id| self.node_order.get(id).copied().unwrap_or(usize::MAX));
        ids
    }
}
