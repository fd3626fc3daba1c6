pub mod flow_network;
pub mod linked_list;
