pub mod a001_wb_order;
