pub mod sflt24;
