pub mod esios;
