//! Per-operator expansion rules: which weight placeholders a node carries and
//! which attributes split off into chained sub-nodes.

/// How a section of a given operator type is decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    /// Weight placeholders attached as extra inputs, in order.
    pub initializers: &'static [&'static str],
    /// `batch_normalize=1` becomes a chained `batch_normalize` node.
    pub batch_normalize: bool,
    /// A non-default `activation` becomes a chained node; `None` disables it.
    pub activation: Option<&'static str>,
}

impl Expansion {
    pub const NONE: Expansion = Expansion {
        initializers: &[],
        batch_normalize: false,
        activation: None,
    };
}

const WEIGHTED: Expansion = Expansion {
    initializers: &["biases", "weights"],
    batch_normalize: true,
    activation: Some("logistic"),
};

const RECURRENT: Expansion = Expansion {
    initializers: &[],
    batch_normalize: true,
    activation: Some("logistic"),
};

const GATED: Expansion = Expansion {
    initializers: &[],
    batch_normalize: true,
    activation: None,
};

pub const POLICIES: &[(&str, Expansion)] = &[
    ("convolutional", WEIGHTED),
    ("deconvolutional", WEIGHTED),
    ("connected", WEIGHTED),
    ("crnn", RECURRENT),
    ("rnn", RECURRENT),
    ("gru", GATED),
    ("lstm", GATED),
    (
        "shortcut",
        Expansion {
            initializers: &[],
            batch_normalize: false,
            activation: Some("linear"),
        },
    ),
    (
        "batch_normalize",
        Expansion {
            initializers: &["scale", "mean", "variance"],
            batch_normalize: false,
            activation: None,
        },
    ),
];

pub fn policy(operator: &str) -> &'static Expansion {
    POLICIES
        .iter()
        .find(|(name, _)| *name == operator)
        .map(|(_, expansion)| expansion)
        .unwrap_or(&Expansion::NONE)
}
