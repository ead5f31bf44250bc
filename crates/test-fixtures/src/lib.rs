//! Shared test topologies: the 14-node NSFnet reference network plus small
//! synthetic graphs with known shortest-path and disjointness structure.

use resilia_core::{Node, Topology, TopologyBuilder};

/// The 14-node NSFnet reference topology. All links are symmetric; weights
/// are approximate great-circle distances.
pub fn nsfnet() -> Topology {
    TopologyBuilder::new("nsfnet")
        .node(Node::with_location("Seattle", 47.6062, 122.3321))
        .node(Node::with_location("Palo Alto", 37.4419, 122.1430))
        .node(Node::with_location("San Diego", 32.7157, 117.1611))
        .node(Node::with_location("Salt Lake City", 40.7608, 111.8910))
        .node(Node::with_location("Boulder", 40.0150, 105.2705))
        .node(Node::with_location("Houston", 29.7604, 95.3698))
        .node(Node::with_location("Lincoln", 40.8258, 96.6852))
        .node(Node::with_location("Champaign", 40.1164, 88.2434))
        .node(Node::with_location("Ann Arbor", 42.2808, 83.7430))
        .node(Node::with_location("Pittsburgh", 40.4406, 79.9959))
        .node(Node::with_location("Atlanta", 33.7490, 84.3880))
        .node(Node::with_location("College Park", 38.9897, 76.9378))
        .node(Node::with_location("Ithaca", 42.4440, 76.5019))
        .node(Node::with_location("Princeton", 40.3573, 74.6672))
        .bidirectional_link("Seattle", "Palo Alto", 1100)
        .bidirectional_link("Seattle", "San Diego", 1600)
        .bidirectional_link("Seattle", "Champaign", 2800)
        .bidirectional_link("Palo Alto", "San Diego", 600)
        .bidirectional_link("Palo Alto", "Salt Lake City", 1000)
        .bidirectional_link("San Diego", "Houston", 2000)
        .bidirectional_link("Salt Lake City", "Ann Arbor", 2400)
        .bidirectional_link("Salt Lake City", "Boulder", 600)
        .bidirectional_link("Boulder", "Houston", 1100)
        .bidirectional_link("Boulder", "Lincoln", 800)
        .bidirectional_link("Houston", "College Park", 2000)
        .bidirectional_link("Houston", "Atlanta", 1200)
        .bidirectional_link("Lincoln", "Champaign", 700)
        .bidirectional_link("Champaign", "Pittsburgh", 700)
        .bidirectional_link("Ann Arbor", "Ithaca", 800)
        .bidirectional_link("Ann Arbor", "Princeton", 800)
        .bidirectional_link("Atlanta", "Pittsburgh", 900)
        .bidirectional_link("Pittsburgh", "Princeton", 500)
        .bidirectional_link("Pittsburgh", "Ithaca", 500)
        .bidirectional_link("College Park", "Princeton", 300)
        .bidirectional_link("College Park", "Ithaca", 300)
        .build()
        .expect("nsfnet fixture is structurally valid")
}

/// Four nodes, two fully disjoint s->t routes of different cost.
pub fn diamond() -> Topology {
    TopologyBuilder::new("diamond")
        .node(Node::new("s"))
        .node(Node::new("a"))
        .node(Node::new("b"))
        .node(Node::new("t"))
        .link("s", "a", 1)
        .link("a", "t", 1)
        .link("s", "b", 3)
        .link("b", "t", 3)
        .build()
        .expect("diamond fixture is structurally valid")
}

/// The classic disjoint-path trap: the single shortest path s->a->b->t uses
/// the middle edge, so a second search must buy it back through the
/// residual graph. The only pair of disjoint routes is {s-a-t, s-b-t}.
pub fn trap() -> Topology {
    TopologyBuilder::new("trap")
        .node(Node::new("s"))
        .node(Node::new("a"))
        .node(Node::new("b"))
        .node(Node::new("t"))
        .link("s", "a", 1)
        .link("a", "b", 1)
        .link("b", "t", 1)
        .link("s", "b", 4)
        .link("a", "t", 4)
        .build()
        .expect("trap fixture is structurally valid")
}

/// A node-disjointness trap: both cheap s->t routes pass through m, so
/// node-disjoint construction must route the second path around it.
pub fn hourglass() -> Topology {
    TopologyBuilder::new("hourglass")
        .node(Node::new("s"))
        .node(Node::new("m"))
        .node(Node::new("t"))
        .node(Node::new("x"))
        .node(Node::new("y"))
        .link("s", "m", 1)
        .link("m", "t", 1)
        .link("s", "x", 2)
        .link("x", "m", 1)
        .link("s", "y", 5)
        .link("y", "t", 5)
        .build()
        .expect("hourglass fixture is structurally valid")
}
