pub mod entity_table;
