//! Topology traits implemented by nodes, links and areas

/// A point of the drainage network
pub trait Node {
    /// Node name
    fn name(&self) -> &str;

    /// Invert elevation
    fn elevation(&self) -> f64;
}

/// A connection between two nodes
pub trait Link {
    /// Link name
    fn name(&self) -> &str;

    /// Upstream node name
    fn from_node(&self) -> &str;

    /// Downstream node name
    fn to_node(&self) -> &str;
}

/// A land area draining into the network
pub trait Area {
    /// Area name
    fn name(&self) -> &str;
}

/// Where a subcatchment sends its runoff: a node or another subcatchment
pub trait RunoffOutlet {
    /// Name written in the outlet column
    fn outlet_name(&self) -> &str;
}

/// Implement [`Node`] and [`RunoffOutlet`] for a record with `name` and `elevation` fields
macro_rules! impl_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::models::topology::Node for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn elevation(&self) -> f64 {
                    self.elevation
                }
            }

            impl $crate::models::topology::RunoffOutlet for $ty {
                fn outlet_name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

/// Implement [`Link`] for a record with `name`, `from_node` and `to_node` fields
macro_rules! impl_link {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::models::topology::Link for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn from_node(&self) -> &str {
                    &self.from_node
                }

                fn to_node(&self) -> &str {
                    &self.to_node
                }
            }
        )+
    };
}

pub(crate) use impl_link;
pub(crate) use impl_node;
