pub mod mock_kernel;
