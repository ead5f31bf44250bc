use proptest::prelude::*;
use resilia_core::{Node, Topology, TopologyBuilder};
use resilia_routing::{compute_disjoint_paths, shortest_path};

fn diamond_with(w: [u64; 4]) -> Topology {
    TopologyBuilder::new("diamond")
        .node(Node::new("s"))
        .node(Node::new("a"))
        .node(Node::new("b"))
        .node(Node::new("t"))
        .link("s", "a", w[0])
        .link("a", "t", w[1])
        .link("s", "b", w[2])
        .link("b", "t", w[3])
        .build()
        .unwrap()
}

fn trap_with(w: [u64; 5]) -> Topology {
    TopologyBuilder::new("trap")
        .node(Node::new("s"))
        .node(Node::new("a"))
        .node(Node::new("b"))
        .node(Node::new("t"))
        .link("s", "a", w[0])
        .link("a", "b", w[1])
        .link("b", "t", w[2])
        .link("s", "b", w[3])
        .link("a", "t", w[4])
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn shortest_route_takes_the_cheaper_arm(w in prop::array::uniform4(1u64..100)) {
        let topo = diamond_with(w);
        let path = shortest_path(&topo, "s", "t");
        prop_assert_eq!(path.total_weight(), (w[0] + w[1]).min(w[2] + w[3]));
    }

    #[test]
    fn disjoint_paths_never_share_links(w in prop::array::uniform5(1u64..50)) {
        let topo = trap_with(w);
        let paths = compute_disjoint_paths(&topo, "s", "t", 2, 0, false, &[]);
        prop_assert_eq!(paths.len(), 2);
        prop_assert!(paths[0].link_ids().is_disjoint(paths[1].link_ids()));
        prop_assert!(paths[0].total_weight() <= paths[1].total_weight());
    }

    #[test]
    fn more_budget_never_yields_fewer_paths(
        w in prop::array::uniform5(1u64..50),
        budget in 0usize..3,
    ) {
        let topo = trap_with(w);
        let fewer = compute_disjoint_paths(&topo, "s", "t", 1, budget, false, &[]);
        let more = compute_disjoint_paths(&topo, "s", "t", 1, budget + 1, false, &[]);
        prop_assert!(more.len() >= fewer.len());
    }

    #[test]
    fn disjoint_family_cost_is_never_below_repeated_shortest(
        w in prop::array::uniform5(1u64..50),
    ) {
        let topo = trap_with(w);
        let single = shortest_path(&topo, "s", "t").total_weight();
        let pair = compute_disjoint_paths(&topo, "s", "t", 2, 0, false, &[]);
        prop_assert_eq!(pair.len(), 2);
        let family: u64 = pair.iter().map(|p| p.total_weight()).sum();
        prop_assert!(family >= 2 * single);
    }
}
