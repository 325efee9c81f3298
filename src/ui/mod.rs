pub mod weekly_table;
