pub mod shared {
    pub mod constants;
    pub mod signal;
}

pub mod augmentation {
    pub mod domain {
        pub mod augmentation_operation;
        pub mod operation_error;
    }
    pub mod infrastructure {
        pub mod fn_operation;
    }
}

pub mod chain {
    pub mod chain_logger;
    pub mod domain {
        pub mod branch_executor;
        pub mod chain;
        pub mod chain_strategy;
        pub mod composition_error;
        pub mod composition_plan;
    }
    pub mod infrastructure;
    #[cfg(test)]
    mod test_operations;
}
