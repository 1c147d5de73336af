mod result_node_tests;
