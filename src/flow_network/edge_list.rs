use crate::flow_network::error::FlowNetworkError;
use crate::flow_network::graph::{Edge, FlowNetwork, Vertex};
use log::debug;
use num_traits::NumAssign;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::ops::Neg;
use std::path::Path;
use std::str::FromStr;

// One edge per line: `from to capacity`, whitespace separated.
impl<V, Flow> FlowNetwork<V, Flow>
where
    V: Vertex + FromStr,
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug,
{
    // declined edges are skipped
    pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Self, FlowNetworkError> {
        let mut network = FlowNetwork::new();
        let mut declined = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = i + 1;
            match &line.split_whitespace().collect::<Vec<_>>()[..] {
                [] => continue,
                [from, to, capacity] => {
                    let from = V::from_str(from).map_err(|_| FlowNetworkError::parse(line_number, &line, format!("invalid vertex `{from}`")))?;
                    let to = V::from_str(to).map_err(|_| FlowNetworkError::parse(line_number, &line, format!("invalid vertex `{to}`")))?;
                    let capacity = Flow::from_str_radix(capacity, 10).map_err(|_| FlowNetworkError::parse(line_number, &line, format!("invalid capacity `{capacity}`")))?;
                    if network.add_edge(from, to, capacity).is_none() {
                        declined += 1;
                    }
                }
                tokens => {
                    return Err(FlowNetworkError::parse(line_number, &line, format!("expected `from to capacity`, got {} fields", tokens.len())));
                }
            }
        }
        debug!("read {} edges over {} vertices, declined {declined}", network.num_edges(), network.num_vertices());
        Ok(network)
    }

    pub fn read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self, FlowNetworkError> {
        let f = BufReader::new(File::open(path)?);
        Self::read_edge_list(f)
    }
}

impl<V, Flow> FlowNetwork<V, Flow>
where
    V: Vertex + Display,
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug + Display,
{
    pub fn write_edge_list<W: Write>(&self, mut writer: W) -> Result<(), FlowNetworkError> {
        for Edge { from, to, capacity, .. } in self.edges() {
            writeln!(writer, "{from} {to} {capacity}")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FlowNetworkError> {
        let file = BufWriter::new(File::create(path)?);
        self.write_edge_list(file)
    }
}
